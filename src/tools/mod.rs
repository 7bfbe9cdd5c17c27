//! The utility endpoints, all under `/api/tools/`.
//!
//! | Method | Path | Handler |
//! |---|---|---|
//! | POST | `remove-html` | [`text::remove_html`] |
//! | POST | `count-chars` | [`text::count_chars`] |
//! | POST | `convert-case` | [`text::convert_case`] |
//! | POST | `sort-words` | [`text::sort_words`] |
//! | POST | `extract-keywords` | [`text::extract_keywords`] |
//! | POST | `generate-nickname` | [`random::generate_nickname`] |
//! | POST | `generate-lotto` | [`random::generate_lotto`] |
//! | POST | `roll-dice` | [`random::roll_dice`] |
//! | GET  | `investment-fortune` | [`random::investment_fortune`] |
//! | POST | `calculate-stock` | [`finance::calculate_stock`] |
//! | POST | `calculate-profit` | [`finance::calculate_profit`] |
//! | POST | `calculate-percent` | [`finance::calculate_percent`] |
//! | POST | `calculate-dday` | [`date::calculate_dday`] |
//! | POST | `download-images` | [`images::ImageExtractor::handle`] |
//! | POST | `generate-ffmpeg` | [`media::generate_ffmpeg`] |
//! | POST | `download-video` | [`media::download_video`] |
//! | POST | `word-list` | [`words::word_list`] |

use std::sync::Arc;

use crate::config::Config;
use crate::error::Error;
use crate::health;
use crate::router::Router;

pub mod date;
pub mod finance;
pub mod images;
pub mod media;
pub mod random;
pub mod text;
pub mod words;

/// Route prefix shared by every tool.
pub const PREFIX: &str = "/api/tools";

/// Builds the application router: every tool, the health probes, and the
/// CORS / access-log switches from `config`.
pub fn router(config: &Config) -> Result<Router, Error> {
    let extractor = Arc::new(images::ImageExtractor::new(&config.fetch)?);

    let router = Router::new()
        .cors(config.http.enable_cors)
        .access_log(config.logging.access_log)
        .get("/healthz", health::liveness)
        .get("/readyz", health::readiness)
        .post(&route("remove-html"), text::remove_html)
        .post(&route("count-chars"), text::count_chars)
        .post(&route("convert-case"), text::convert_case)
        .post(&route("sort-words"), text::sort_words)
        .post(&route("extract-keywords"), text::extract_keywords)
        .post(&route("generate-nickname"), random::generate_nickname)
        .post(&route("generate-lotto"), random::generate_lotto)
        .post(&route("roll-dice"), random::roll_dice)
        .get(&route("investment-fortune"), random::investment_fortune)
        .post(&route("calculate-stock"), finance::calculate_stock)
        .post(&route("calculate-profit"), finance::calculate_profit)
        .post(&route("calculate-percent"), finance::calculate_percent)
        .post(&route("calculate-dday"), date::calculate_dday)
        .post(&route("download-images"), move |req| {
            let extractor = Arc::clone(&extractor);
            async move { extractor.handle(req).await }
        })
        .post(&route("generate-ffmpeg"), media::generate_ffmpeg)
        .post(&route("download-video"), media::download_video)
        .post(&route("word-list"), words::word_list);

    Ok(router)
}

fn route(name: &str) -> String {
    format!("{PREFIX}/{name}")
}

/// Rounds half away from zero to two decimals.
pub(crate) fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
