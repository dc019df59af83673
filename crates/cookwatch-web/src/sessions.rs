//! Session aggregation: turns raw `image2` rows into the session view the
//! dashboard renders.

use chrono::NaiveDateTime;
use tracing::{error, warn};

use crate::db::{self, Db, SessionRow};
use crate::util::time::parse_stored_datetime;

pub const UNKNOWN_STYLE: &str = "Unknown";
pub const NOT_SPECIFIED_INGREDIENTS: &str = "Not specified";
pub const NO_DESCRIPTION: &str = "No description";
pub const PLACEHOLDER_THUMBNAIL: &str = "/images/placeholder-cooking.jpg";

#[derive(Debug, Clone, PartialEq)]
pub struct CookingSession {
    pub session_number: i64,
    pub date_time: Option<NaiveDateTime>,
    /// `None` when the row had no usable style; see [`Self::style_label`].
    pub cooking_style: Option<String>,
    /// Parsed once from the brace-wrapped column; order and repeats kept.
    pub ingredients: Vec<String>,
    pub dish_description: String,
    pub thumbnail_image_path: String,
    /// Representative scraped image, filled in per request.
    pub image_url: Option<String>,
}

impl CookingSession {
    pub fn from_row(row: SessionRow) -> Self {
        let date_time = row.datetime.as_deref().and_then(|raw| {
            let parsed = parse_stored_datetime(raw);
            if parsed.is_none() {
                warn!(session_number = row.session, raw, "unparseable session datetime");
            }
            parsed
        });
        Self {
            session_number: row.session,
            date_time,
            cooking_style: present(row.style),
            ingredients: present(row.ingredient)
                .map(|raw| parse_ingredients(&raw))
                .unwrap_or_default(),
            dish_description: present(row.description)
                .unwrap_or_else(|| NO_DESCRIPTION.to_owned()),
            thumbnail_image_path: PLACEHOLDER_THUMBNAIL.to_owned(),
            image_url: None,
        }
    }

    pub fn style_label(&self) -> &str {
        self.cooking_style.as_deref().unwrap_or(UNKNOWN_STYLE)
    }

    pub fn ingredients_label(&self) -> String {
        if self.ingredients.is_empty() {
            NOT_SPECIFIED_INGREDIENTS.to_owned()
        } else {
            self.ingredients.join(", ")
        }
    }

    /// Ingredients with repeats removed, first occurrence order.
    pub fn distinct_ingredients(&self) -> Vec<&str> {
        let mut seen = Vec::with_capacity(self.ingredients.len());
        for ingredient in &self.ingredients {
            if !seen.contains(&ingredient.as_str()) {
                seen.push(ingredient.as_str());
            }
        }
        seen
    }

    /// Scraped image when one was found, the placeholder otherwise.
    pub fn thumbnail(&self) -> &str {
        self.image_url
            .as_deref()
            .unwrap_or(&self.thumbnail_image_path)
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

/// `{tomato, basil ,, egg}` -> `["tomato", "basil", "egg"]`.
pub fn parse_ingredients(raw: &str) -> Vec<String> {
    raw.replace(['{', '}'], "")
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_owned)
        .collect()
}

/// All sessions, highest session number first. Storage failures degrade to
/// an empty list.
pub fn list_sessions(db: &Db) -> Vec<CookingSession> {
    match db::load_session_rows(db) {
        Ok(rows) => rows.into_iter().map(CookingSession::from_row).collect(),
        Err(error) => {
            error!(%error, "failed to load cooking sessions");
            Vec::new()
        }
    }
}

pub fn session_by_number(db: &Db, session_number: i64) -> Option<CookingSession> {
    match db::load_session_row(db, session_number) {
        Ok(row) => row.map(CookingSession::from_row),
        Err(error) => {
            error!(%error, session_number, "failed to load cooking session");
            None
        }
    }
}
