//! Sentiment report payload
//!
//! Fixed-shape JSON document returned by the analyze endpoint. Field order
//! here is the field order on the wire.

use chrono::NaiveDateTime;
use serde::Serialize;

use super::isoformat;

const REDDIT_ITEMS_FOUND: u32 = 5;
const NEWS_ITEMS_FOUND: u32 = 3;

/// Trading signal verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Signal {
    Bullish,
    Neutral,
}

/// Confidence attached to a signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Confidence {
    High,
    Medium,
}

/// Kind of source an item or component analysis came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Reddit,
    News,
}

#[derive(Debug, Clone, Serialize)]
pub struct SentimentReport {
    pub symbol: String,
    pub metadata: Metadata,
    pub sources: Sources,
    pub total_items: u32,
    pub timestamp: String,
    pub sentiment_analysis: SentimentAnalysis,
}

#[derive(Debug, Clone, Serialize)]
pub struct Metadata {
    pub keywords: Vec<String>,
    pub subs: Vec<&'static str>,
    pub category: &'static str,
    pub regions: Vec<&'static str>,
    pub note: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Sources {
    pub reddit: SourceFeed<RedditPost>,
    pub news: SourceFeed<NewsArticle>,
}

/// One source's findings; `items` is a sample, `items_found` the claimed total
#[derive(Debug, Clone, Serialize)]
pub struct SourceFeed<T> {
    pub enabled: bool,
    pub items_found: u32,
    pub items: Vec<T>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RedditPost {
    pub title: String,
    pub url: &'static str,
    pub author: &'static str,
    pub subreddit: &'static str,
    pub created_at: String,
    pub text: String,
    pub upvotes: u32,
    pub comments: u32,
    pub upvote_ratio: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewsArticle {
    pub title: String,
    pub url: &'static str,
    pub publisher: &'static str,
    pub published: String,
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SentimentAnalysis {
    pub signal: Signal,
    pub confidence: Confidence,
    pub buy_probability: String,
    pub sell_probability: String,
    pub rationale: String,
    pub key_insights: Vec<String>,
    pub risk_level: &'static str,
    pub timeframe: &'static str,
    pub sources_analyzed: u32,
    pub source_types: Vec<SourceType>,
    pub analysis_timestamp: String,
    pub component_analyses: Vec<ComponentAnalysis>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComponentAnalysis {
    pub source_type: SourceType,
    pub signal: Signal,
    pub confidence: Confidence,
    pub sentiment_score: f64,
}

impl SentimentReport {
    /// Build the canned bullish report for an already upper-cased symbol.
    ///
    /// `now` is read once by the caller so every timestamp in one response agrees.
    pub fn mock(symbol: &str, now: NaiveDateTime) -> Self {
        let stamp = isoformat(&now);
        let sources = Sources::mock(symbol, &stamp);
        let total_items = sources.reddit.items_found + sources.news.items_found;

        Self {
            symbol: symbol.to_string(),
            metadata: Metadata::mock(symbol),
            sources,
            total_items,
            timestamp: stamp.clone(),
            sentiment_analysis: SentimentAnalysis::mock(symbol, total_items, stamp),
        }
    }
}

impl Metadata {
    fn mock(symbol: &str) -> Self {
        let (base, quote) = split_pair(symbol);
        Self {
            keywords: vec![
                "forex".to_string(),
                "trading".to_string(),
                base,
                quote,
                "currency".to_string(),
            ],
            subs: vec!["forex", "trading", "investing"],
            category: "Currency Trading",
            regions: vec!["Global"],
            note: "Mock data from test server",
        }
    }
}

impl Sources {
    fn mock(symbol: &str, stamp: &str) -> Self {
        Self {
            reddit: SourceFeed {
                enabled: true,
                items_found: REDDIT_ITEMS_FOUND,
                items: vec![RedditPost {
                    title: format!("[LIVE] {symbol} Technical Analysis"),
                    url: "https://reddit.com/r/forex/mock",
                    author: "test_trader",
                    subreddit: "forex",
                    created_at: stamp.to_string(),
                    text: format!(
                        "Looking at {symbol} charts, seems like we have strong support..."
                    ),
                    upvotes: 42,
                    comments: 8,
                    upvote_ratio: 0.89,
                }],
            },
            news: SourceFeed {
                enabled: true,
                items_found: NEWS_ITEMS_FOUND,
                items: vec![NewsArticle {
                    title: format!("{symbol} Forecast: Technical and Fundamental Analysis"),
                    url: "https://example.com/news/mock",
                    publisher: "Mock Financial News",
                    published: stamp.to_string(),
                    text: format!("Latest {symbol} analysis suggests..."),
                }],
            },
        }
    }
}

impl SentimentAnalysis {
    fn mock(symbol: &str, sources_analyzed: u32, stamp: String) -> Self {
        Self {
            signal: Signal::Bullish,
            confidence: Confidence::High,
            buy_probability: percent(68),
            sell_probability: percent(32),
            rationale: format!(
                "Based on technical analysis and market sentiment, {symbol} shows bullish momentum with strong support levels."
            ),
            key_insights: vec![
                format!("{symbol} showing strong bullish momentum"),
                "Technical indicators align with positive sentiment".to_string(),
                "Market risk appetite favors this currency pair".to_string(),
            ],
            risk_level: "Medium",
            timeframe: "24h",
            sources_analyzed,
            source_types: vec![SourceType::Reddit, SourceType::News],
            analysis_timestamp: stamp,
            component_analyses: vec![
                ComponentAnalysis {
                    source_type: SourceType::Reddit,
                    signal: Signal::Bullish,
                    confidence: Confidence::High,
                    sentiment_score: 0.72,
                },
                ComponentAnalysis {
                    source_type: SourceType::News,
                    signal: Signal::Neutral,
                    confidence: Confidence::Medium,
                    sentiment_score: 0.15,
                },
            ],
        }
    }
}

fn percent(value: u8) -> String {
    format!("{value}%")
}

/// Split a pair ticker into its first three characters and the remainder.
///
/// Counts characters, not bytes, so non-ASCII symbols never split mid-codepoint.
fn split_pair(symbol: &str) -> (String, String) {
    let split_at = symbol
        .char_indices()
        .nth(3)
        .map_or(symbol.len(), |(idx, _)| idx);
    let (base, quote) = symbol.split_at(split_at);
    (base.to_string(), quote.to_string())
}
