use crate::connectors::{ConnectorError, InsightModel};
use crate::models::{ChatTurn, Insight};
use crate::{db, forms};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("Business {0} not found")]
    UnknownBusiness(String),
    #[error(transparent)]
    Model(#[from] ConnectorError),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// The structured payload the model is asked to produce for an insight
/// request. Mirrors the JSON contract spelled out in the prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightPayload {
    pub peak_hours: String,
    pub competition: String,
    pub price_sensitivity: String,
    pub quick_wins: Vec<String>,
    pub customer_profile: String,
    pub competitive_landscape: String,
    pub growth_opportunity: String,
    #[serde(default)]
    pub data_note: String,
}

fn location_string(state: &str, area: Option<&str>) -> String {
    match area {
        Some(area) => format!("{}, {}", area, state),
        None => state.to_string(),
    }
}

/// The consultant prompt sent to the model for a fresh insight.
pub fn build_insight_prompt(business_type: &str, state: &str, area: Option<&str>) -> String {
    let current_date = Utc::now().format("%B %d, %Y").to_string();
    let location = location_string(state, area);

    format!(
        r#"You are analyzing a business environment in Nigeria as of {current_date}.

Business Type: {business_type}
Location: {location}, Nigeria

Use Google Search to find CURRENT information about this location and business type in Nigeria.

Generate insights in this EXACT JSON format (no markdown, no code blocks):
{{
    "peak_hours": "One clear sentence about when business is busiest in this area",
    "competition": "One sentence: HIGH/MEDIUM/LOW competition and why",
    "price_sensitivity": "One sentence about customer price expectations in this area",
    "quick_wins": [
        "Specific action they can take this week based on local market",
        "Another immediate opportunity relevant to {location}",
        "Third actionable recommendation for {business_type} in this area"
    ],
    "customer_profile": "2-3 sentences about typical customers in {location}",
    "competitive_landscape": "What the competition looks like for {business_type} in {location}",
    "growth_opportunity": "One specific untapped opportunity for this business type in {location}",
    "data_note": "Brief note on data sources (e.g., 'Based on recent market data for {location}')"
}}

Be specific to {location} and {business_type}. Use real, current data from Nigeria."#
    )
}

/// The advisor prompt for a chat turn about an existing insight.
pub fn build_chat_prompt(
    message: &str,
    business_type: &str,
    state: &str,
    area: Option<&str>,
    insight: &serde_json::Value,
    history: &[ChatTurn],
) -> String {
    let current_date = Utc::now().format("%B %d, %Y").to_string();
    let location = location_string(state, area);

    let history_json = if history.is_empty() {
        "No previous messages".to_string()
    } else {
        let turns: Vec<serde_json::Value> = history
            .iter()
            .map(|t| serde_json::json!({ "role": t.role, "message": t.message }))
            .collect();
        serde_json::to_string_pretty(&turns).unwrap_or_else(|_| "[]".to_string())
    };

    let insight_json =
        serde_json::to_string_pretty(insight).unwrap_or_else(|_| "{}".to_string());

    format!(
        r#"You are a Nigerian business advisor chatting on {current_date}.

Business Context:
- Type: {business_type}
- Location: {location}

Their Insights:
{insight_json}

Recent Chat:
{history_json}

User Question: {message}

Respond in 2-3 short paragraphs. Be specific, practical, and reference their insights.
Use Google Search if you need current information about Nigeria, {location}, or {business_type} businesses.
Keep responses conversational and actionable."#
    )
}

/// Strip the Markdown code fences models like to wrap JSON in, despite being
/// told not to.
pub fn strip_code_fences(text: &str) -> &str {
    let mut text = text.trim();
    if let Some(rest) = text.strip_prefix("```json") {
        text = rest;
    } else if let Some(rest) = text.strip_prefix("```") {
        text = rest;
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }
    text.trim()
}

pub fn parse_insight_payload(text: &str) -> Result<InsightPayload, ConnectorError> {
    let cleaned = strip_code_fences(text);
    serde_json::from_str(cleaned).map_err(|err| {
        ConnectorError::InvalidResponse(format!(
            "Model answer is not the expected insight JSON: {}",
            err
        ))
    })
}

/// Assemble a persistable insight from a parsed payload and the request that
/// produced it. `generated_at` is filled in by the database on insert.
pub fn into_insight(
    payload: InsightPayload,
    business_code: Option<String>,
    business_type: String,
    state: String,
    area: Option<String>,
    grounded: bool,
) -> Insight {
    Insight {
        id: 0,
        business_code,
        business_type,
        state,
        area,
        peak_hours: payload.peak_hours,
        competition: payload.competition,
        price_sensitivity: payload.price_sensitivity,
        quick_wins: serde_json::json!(payload.quick_wins),
        customer_profile: payload.customer_profile,
        competitive_landscape: payload.competitive_landscape,
        growth_opportunity: payload.growth_opportunity,
        data_note: payload.data_note,
        grounded,
        generated_at: Utc::now(),
    }
}

/// The full generate flow shared by the public and the partner endpoints:
/// resolve the business (when a code is attached), prompt the model with
/// search grounding, parse the payload and persist the insight.
pub async fn generate_and_store(
    pool: &PgPool,
    model: &dyn InsightModel,
    request: &forms::InsightRequest,
) -> Result<Insight, GenerateError> {
    if let Some(code) = &request.business_code {
        db::business::fetch(pool, code)
            .await?
            .ok_or_else(|| GenerateError::UnknownBusiness(code.clone()))?;
    }

    let prompt = build_insight_prompt(
        &request.business_type,
        &request.state,
        request.area.as_deref(),
    );
    let answer = model.generate(&prompt, true).await?;
    let payload = parse_insight_payload(&answer)?;

    let insight = into_insight(
        payload,
        request.business_code.clone(),
        request.business_type.clone(),
        request.state.clone(),
        request.area.clone(),
        true,
    );

    let stored = db::insight::insert(pool, insight).await?;
    tracing::info!(insight_id = stored.id, location = %stored.location(),
        "Stored generated insight");

    Ok(stored)
}

/// Plain-text export of an insight, for download by the business owner.
pub fn render_report(insight: &Insight) -> String {
    let mut report = String::new();

    report.push_str("KIOMATE BUSINESS INSIGHTS\n");
    report.push_str(&format!(
        "Generated: {}\n",
        insight.generated_at.format("%Y-%m-%d %H:%M")
    ));
    if insight.grounded {
        report.push_str("Based on: Real-time Google Search data\n");
    }
    report.push('\n');

    if let Some(code) = &insight.business_code {
        report.push_str(&format!("Business ID: {}\n", code));
    }
    report.push_str(&format!("Type: {}\n", insight.business_type));
    report.push_str(&format!("Location: {}, Nigeria\n\n", insight.location()));

    report.push_str(&format!("CUSTOMER PROFILE:\n{}\n\n", insight.customer_profile));
    report.push_str(&format!("PEAK HOURS:\n{}\n\n", insight.peak_hours));
    report.push_str(&format!("COMPETITION:\n{}\n\n", insight.competition));
    report.push_str(&format!(
        "PRICING:\n{}\n\n",
        insight.price_sensitivity
    ));

    report.push_str("QUICK WINS:\n");
    for (i, tip) in insight.quick_wins_list().iter().enumerate() {
        report.push_str(&format!("{}. {}\n", i + 1, tip));
    }
    report.push('\n');

    report.push_str(&format!(
        "COMPETITIVE LANDSCAPE:\n{}\n\n",
        insight.competitive_landscape
    ));
    report.push_str(&format!(
        "GROWTH OPPORTUNITY:\n{}\n\n",
        insight.growth_opportunity
    ));

    if !insight.data_note.is_empty() {
        report.push_str(&format!("DATA SOURCE:\n{}\n\n", insight.data_note));
    }

    report.push_str("---\nPowered by KioMate\n");
    report
}
