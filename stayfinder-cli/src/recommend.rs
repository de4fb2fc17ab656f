//! Recommend command implementation.
//!
//! Flow: load catalog → score (best-effort sentiment) → rank → optional
//! area resolution → final filter/sort pass → optional remote refine →
//! render. Distance-ranked resolutions keep their ascending-distance order
//! through the final pass, since that ordering is the presentation contract
//! for "nearest" results.

use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use clap::Args;
use serde_json::{Value, json};
use stayfinder_core::{
    FallbackClassifier, Hotel, HotelKey, Persona, PriceRange, RankCriteria, ScoreBundle,
    SentimentClassifier, SortKey, rank, score_hotels,
};
use stayfinder_data::geocode::DEFAULT_BASE_URL;
use stayfinder_data::{
    HttpGeocoder, HttpRefineClient, HttpSentimentClassifier, RefineCriteria, load_catalog,
};
use stayfinder_search::{AreaResolution, ResolutionOutcome, SearchSession};

use crate::CliError;

/// CLI arguments for the `recommend` subcommand.
#[derive(Debug, Clone, Args)]
#[command(
    long_about = "Load a hotel catalog from JSON, apply city/price/star \
                 filters and a sort key, and optionally narrow the result \
                 with a free-text area query resolved via fuzzy matching \
                 or geocoding.",
    about = "Rank hotel candidates from a catalog file"
)]
pub(crate) struct RecommendArgs {
    /// Path to the hotel catalog JSON file.
    #[arg(long, value_name = "path", env = "STAYFINDER_CATALOG")]
    pub(crate) catalog: PathBuf,
    /// Restrict candidates to a city ("all" disables the filter).
    #[arg(long, value_name = "city")]
    pub(crate) city: Option<String>,
    /// Traveler persona forwarded to the refine endpoint.
    #[arg(long, value_name = "persona")]
    pub(crate) persona: Option<String>,
    /// Sort key: ai_score, price, or star.
    #[arg(long, value_name = "key", default_value = "ai_score")]
    pub(crate) sort: String,
    /// Minimum nightly price, inclusive.
    #[arg(long, value_name = "amount")]
    pub(crate) min_price: Option<f64>,
    /// Maximum nightly price, inclusive.
    #[arg(long, value_name = "amount")]
    pub(crate) max_price: Option<f64>,
    /// Exact star rating filter (applies when sorting by star).
    #[arg(long, value_name = "stars")]
    pub(crate) star_rating: Option<f64>,
    /// Free-text area or landmark query.
    #[arg(long, value_name = "query")]
    pub(crate) area: Option<String>,
    /// Base URL of the geocoding service.
    #[arg(
        long,
        value_name = "url",
        env = "STAYFINDER_GEOCODER_URL",
        default_value = DEFAULT_BASE_URL
    )]
    pub(crate) geocoder_url: String,
    /// Base URL of the sentiment inference service; omitted means the
    /// fixed fallback classification is used.
    #[arg(long, value_name = "url", env = "STAYFINDER_SENTIMENT_URL")]
    pub(crate) sentiment_url: Option<String>,
    /// Base URL of the remote refine service; omitted skips refinement.
    #[arg(long, value_name = "url", env = "STAYFINDER_REFINE_URL")]
    pub(crate) refine_url: Option<String>,
    /// Output format: text or json.
    #[arg(long, value_name = "format", default_value = "text")]
    pub(crate) format: String,
}

impl RecommendArgs {
    fn into_config(self) -> Result<RecommendConfig, CliError> {
        let sort = SortKey::from_str(&self.sort)?;
        let persona = self
            .persona
            .as_deref()
            .map(Persona::from_str)
            .transpose()?;
        let price = match (self.min_price, self.max_price) {
            (None, None) => None,
            (min, max) => Some(PriceRange::new(
                min.unwrap_or(0.0),
                max.unwrap_or(f64::INFINITY),
            )?),
        };
        let format = OutputFormat::from_str(&self.format)?;
        Ok(RecommendConfig {
            catalog: self.catalog,
            criteria: RankCriteria {
                city: self.city,
                price,
                star_rating: self.star_rating,
                sort,
            },
            persona,
            area: self.area,
            geocoder_url: self.geocoder_url,
            sentiment_url: self.sentiment_url,
            refine_url: self.refine_url,
            format,
        })
    }
}

/// Resolved `recommend` command configuration.
#[derive(Debug, Clone)]
struct RecommendConfig {
    catalog: PathBuf,
    criteria: RankCriteria,
    persona: Option<Persona>,
    area: Option<String>,
    geocoder_url: String,
    sentiment_url: Option<String>,
    refine_url: Option<String>,
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(CliError::InvalidOutputFormat(value.to_owned())),
        }
    }
}

pub(crate) async fn run(args: RecommendArgs) -> Result<(), CliError> {
    let config = args.into_config()?;
    let hotels = load_catalog(&config.catalog)?;
    log::info!(
        "loaded {} hotels from {}",
        hotels.len(),
        config.catalog.display()
    );

    let classifier: Arc<dyn SentimentClassifier> = match &config.sentiment_url {
        Some(url) => Arc::new(HttpSentimentClassifier::new(url.clone())?),
        None => Arc::new(FallbackClassifier),
    };
    let scored = score_hotels(&hotels, classifier.as_ref()).await;
    let scores: HashMap<HotelKey, ScoreBundle> = scored
        .iter()
        .map(|entry| (entry.hotel.key(), entry.scores))
        .collect();

    let ranked = rank(&hotels, &config.criteria);

    let resolution = match &config.area {
        Some(area) => {
            let geocoder = HttpGeocoder::new(config.geocoder_url.clone())?;
            SearchSession::new()
                .resolve(area, config.criteria.city.as_deref(), &ranked, &geocoder)
                .await
        }
        None => None,
    };

    let mut shortlist = final_shortlist(resolution.as_ref(), &ranked, &config.criteria);

    if let Some(url) = &config.refine_url {
        let refine = HttpRefineClient::new(url.clone())?;
        let criteria = RefineCriteria {
            persona: config.persona,
            address: config.area.clone(),
            price_min: config.criteria.price.map(|range| range.min),
            price_max: config.criteria.price.map(|range| range.max),
            hotel_star_rating: config.criteria.star_rating,
            average_rating_min: None,
        };
        shortlist = refine.refine(&shortlist, &criteria).await;
    }

    render(&shortlist, &scores, resolution.as_ref(), config.format)
}

/// Final filter/sort pass over the resolution result.
///
/// Distance-ranked hotels keep their ascending-distance order; everything
/// else goes through the ranking pipeline once more.
fn final_shortlist(
    resolution: Option<&AreaResolution>,
    ranked: &[Hotel],
    criteria: &RankCriteria,
) -> Vec<Hotel> {
    match resolution {
        Some(resolution) => match &resolution.outcome {
            ResolutionOutcome::DistanceRanked { .. } => resolution.hotels.clone(),
            ResolutionOutcome::Idle => ranked.to_vec(),
            _ => rank(&resolution.hotels, criteria),
        },
        None => ranked.to_vec(),
    }
}

fn render(
    shortlist: &[Hotel],
    scores: &HashMap<HotelKey, ScoreBundle>,
    resolution: Option<&AreaResolution>,
    format: OutputFormat,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Text => {
            render_text(shortlist, scores, resolution);
            Ok(())
        }
        OutputFormat::Json => render_json(shortlist, scores, resolution),
    }
}

fn render_text(
    shortlist: &[Hotel],
    scores: &HashMap<HotelKey, ScoreBundle>,
    resolution: Option<&AreaResolution>,
) {
    if let Some(resolution) = resolution {
        match &resolution.outcome {
            ResolutionOutcome::Matched => {
                println!("area match for \"{}\"", resolution.query);
            }
            ResolutionOutcome::DistanceRanked { center, .. } => {
                println!(
                    "nearest to \"{}\" (centre {:.4}, {:.4})",
                    resolution.query, center.y, center.x
                );
            }
            _ => {
                if let Some(advisory) = resolution.advisory() {
                    println!("{advisory}");
                }
            }
        }
    }

    if shortlist.is_empty() {
        println!("no hotels matched the given criteria");
        return;
    }

    for (index, hotel) in shortlist.iter().enumerate() {
        println!("{}. {} — {}", index + 1, hotel.name, hotel.city);
        if !hotel.address.is_empty() {
            println!("   {}", hotel.address);
        }
        let mut details: Vec<String> = Vec::new();
        if let Some(stars) = hotel.hotel_star_rating {
            details.push(format!("{stars}★"));
        }
        if let Some(price) = hotel.price_range {
            details.push(format!("₹{price:.0}/night"));
        }
        if let Some(score) = hotel.overall_score {
            details.push(format!("ai {score:.1}"));
        }
        if let Some(bundle) = scores.get(&hotel.key()) {
            details.push(format!("combined {:.2}", bundle.combined_score));
        }
        if let Some(km) = distance_for(resolution, hotel) {
            details.push(format!("{km:.1} km away"));
        }
        if !details.is_empty() {
            println!("   {}", details.join("  "));
        }
    }
}

fn render_json(
    shortlist: &[Hotel],
    scores: &HashMap<HotelKey, ScoreBundle>,
    resolution: Option<&AreaResolution>,
) -> Result<(), CliError> {
    let hotels: Vec<Value> = shortlist
        .iter()
        .map(|hotel| {
            let mut entry = json!({
                "name": hotel.name,
                "city": hotel.city,
                "address": hotel.address,
                "overall_score": hotel.overall_score,
                "price_range": hotel.price_range,
                "hotel_star_rating": hotel.hotel_star_rating,
                "average_platform_rating": hotel.average_platform_rating,
            });
            if let Some(coords) = hotel.coordinates {
                entry["coordinates"] = json!({"lat": coords.y, "lng": coords.x});
            }
            if let Some(bundle) = scores.get(&hotel.key()) {
                entry["scores"] = json!({
                    "sentiment_score": bundle.sentiment_score,
                    "normalized_rating": bundle.normalized_rating,
                    "combined_score": bundle.combined_score,
                });
            }
            if let Some(km) = distance_for(resolution, hotel) {
                entry["distance_km"] = json!(km);
            }
            entry
        })
        .collect();

    let output = json!({
        "hotels": hotels,
        "status": status_value(resolution),
    });
    let rendered = serde_json::to_string_pretty(&output).map_err(CliError::SerializeOutput)?;
    println!("{rendered}");
    Ok(())
}

fn distance_for(resolution: Option<&AreaResolution>, hotel: &Hotel) -> Option<f64> {
    match resolution.map(|resolution| &resolution.outcome) {
        Some(ResolutionOutcome::DistanceRanked { distances, .. }) => {
            distances.get(&hotel.key()).copied()
        }
        _ => None,
    }
}

fn status_value(resolution: Option<&AreaResolution>) -> Value {
    let Some(resolution) = resolution else {
        return Value::Null;
    };
    match &resolution.outcome {
        ResolutionOutcome::Idle => Value::Null,
        ResolutionOutcome::Matched => json!({
            "kind": "matched",
            "query": resolution.query,
        }),
        ResolutionOutcome::DistanceRanked { center, .. } => json!({
            "kind": "nearest",
            "query": resolution.query,
            "center": {"lat": center.y, "lng": center.x},
        }),
        ResolutionOutcome::NoMatchFallback => json!({
            "kind": "no_exact_match",
            "message": resolution.advisory(),
        }),
        ResolutionOutcome::SearchFailed { message } => json!({
            "kind": "search_failed",
            "message": message,
        }),
    }
}
