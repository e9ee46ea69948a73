//! Plain-text rendering of home screen sections.

use chrono::Datelike;
use marquee_core::{
    HeroCarousel, SectionKind, SectionState, home::TrendingRail,
};
use marquee_model::{BackdropSize, MovieSummary, PosterSize};

const MISSING: &str = "-";

/// One-line movie card: title, year and rating.
pub fn card_line(movie: &MovieSummary) -> String {
    let year = movie
        .release_date_parsed()
        .map(|date| date.year().to_string())
        .or_else(|| movie.release_year().map(str::to_string))
        .unwrap_or_else(|| MISSING.to_string());
    let rating = movie
        .rating_label()
        .unwrap_or_else(|| MISSING.to_string());
    format!("{} ({year})  * {rating}", movie.title)
}

/// Poster link shown under a card, when the movie has one.
pub fn poster_line(
    movie: &MovieSummary,
    image_base: &str,
) -> Option<String> {
    movie
        .poster_url(image_base, PosterSize::W342)
        .map(|url| format!("       poster: {url}"))
}

pub fn heading(title: &str) -> String {
    format!("== {title} ==")
}

pub fn numbered<'a>(
    movies: impl IntoIterator<Item = &'a MovieSummary>,
    image_base: &str,
) -> Vec<String> {
    let mut lines = Vec::new();
    for (index, movie) in movies.into_iter().enumerate() {
        lines.push(format!("{:>3}. {}", index + 1, card_line(movie)));
        lines.extend(poster_line(movie, image_base));
    }
    lines
}

/// Dot indicator, filled at the current slide.
pub fn dots(len: usize, current: Option<usize>) -> String {
    (0..len)
        .map(|index| if Some(index) == current { "o" } else { "." })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn hero_slide(hero: &HeroCarousel, image_base: &str) -> Vec<String> {
    let state = hero.state();
    let mut lines = Vec::new();
    if let Some(movie) = hero.current() {
        lines.push(format!(">> {}", card_line(movie)));
        if !movie.overview.is_empty() {
            lines.push(format!("   {}", movie.overview));
        }
        let backdrop = movie.backdrop_url(image_base, BackdropSize::W1280);
        if let Some(url) = backdrop {
            lines.push(format!("   backdrop: {url}"));
        }
    }
    lines.push(format!("   {}", dots(state.len(), state.current_index())));
    lines
}

pub fn hero_section(
    section: &SectionState<HeroCarousel>,
    image_base: &str,
) -> Vec<String> {
    let mut lines = vec![heading("Now Playing")];
    match section.ready() {
        Some(hero) => lines.extend(hero_slide(hero, image_base)),
        None => lines.extend(
            section
                .message(SectionKind::Hero)
                .map(str::to_string),
        ),
    }
    lines
}

pub fn trending_section(
    section: &SectionState<TrendingRail>,
    image_base: &str,
) -> Vec<String> {
    let mut lines = vec![heading("Trending This Week")];
    match section.ready() {
        Some(trending) => {
            lines.extend(numbered(trending.items(), image_base));
            let affordances = trending.rail().affordances();
            lines.push(format!(
                "   [<] {}  [>] {}",
                on_off(affordances.can_scroll_left),
                on_off(affordances.can_scroll_right)
            ));
        }
        None => lines.extend(
            section
                .message(SectionKind::Trending)
                .map(str::to_string),
        ),
    }
    lines
}

pub fn popular_section(
    section: &SectionState<Vec<&MovieSummary>>,
    image_base: &str,
    next_page: Option<u32>,
    error: Option<&str>,
) -> Vec<String> {
    let mut lines = vec![heading("Popular")];
    match section.ready() {
        Some(items) => {
            lines.extend(numbered(items.iter().copied(), image_base));
            if let Some(error) = error {
                lines.push(format!("   ! {error}"));
            } else if let Some(page) = next_page {
                lines.push(format!("   ... more available (page {page})"));
            }
        }
        None => lines.extend(
            section
                .message(SectionKind::Popular)
                .map(str::to_string),
        ),
    }
    lines
}

fn on_off(enabled: bool) -> &'static str {
    if enabled { "on" } else { "off" }
}
