//! Category and language listings for upload forms.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use vpub_models::{Language, SUPPORTED_LANGUAGES};

use crate::state::AppState;

#[derive(Serialize)]
pub struct CategorySummary {
    pub key: String,
    pub keywords: Vec<String>,
}

#[derive(Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<CategorySummary>,
    pub default: String,
}

#[derive(Serialize)]
pub struct LanguagesResponse {
    pub languages: &'static [Language],
}

/// List catalog categories in key order.
pub async fn list_categories(State(state): State<AppState>) -> Json<CategoriesResponse> {
    let catalog = state.synthesizer.catalog();
    let categories = catalog
        .iter()
        .map(|(key, profile)| CategorySummary {
            key: key.to_string(),
            keywords: profile.keywords().to_vec(),
        })
        .collect();

    Json(CategoriesResponse {
        categories,
        default: catalog.default_key().to_string(),
    })
}

/// List languages offered by the upload form.
pub async fn list_languages() -> Json<LanguagesResponse> {
    Json(LanguagesResponse {
        languages: SUPPORTED_LANGUAGES,
    })
}
