use crate::context::AppContext;
use crate::error::ApiError;
use axum::extract::{Query, State};
use axum::Json;
use chrono::{DateTime, Utc};
use gasguard_domain::{
    CommandKind, CommandMode, DomainError, Reading, ReadingRangeInput, RecordReadingInput,
    RelayCommandInput,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingDto {
    pub gas: f64,
    pub distance: f64,
    pub connection_count: u64,
    pub timestamp: DateTime<Utc>,
}

impl From<Reading> for ReadingDto {
    fn from(reading: Reading) -> Self {
        Self {
            gas: reading.gas,
            distance: reading.distance,
            connection_count: reading.connection_count,
            timestamp: reading.timestamp,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordReadingBody {
    pub gas: f64,
    pub distance: f64,
    #[serde(default)]
    pub connection_count: u64,
}

/// POST /api/gas — device pushes one sample.
pub async fn record_reading(
    State(ctx): State<AppContext>,
    Json(body): Json<RecordReadingBody>,
) -> Result<Json<Value>, ApiError> {
    ctx.readings
        .record(RecordReadingInput {
            gas: body.gas,
            distance: body.distance,
            connection_count: body.connection_count,
        })
        .await?;
    Ok(Json(json!({ "message": "saved" })))
}

/// GET /api/gas — full history, newest first.
pub async fn reading_history(
    State(ctx): State<AppContext>,
) -> Result<Json<Vec<ReadingDto>>, ApiError> {
    let readings = ctx.readings.history().await?;
    Ok(Json(readings.into_iter().map(ReadingDto::from).collect()))
}

#[derive(Debug, Deserialize)]
pub struct RangeParams {
    pub from: String,
    pub to: String,
}

fn parse_bound(raw: &str, which: &str) -> Result<DateTime<Utc>, DomainError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| DomainError::InvalidTimeRange(format!("bad '{which}' bound: {e}")))
}

/// GET /api/gas/range?from=..&to=.. — window in ascending order, for
/// charting.
pub async fn reading_range(
    State(ctx): State<AppContext>,
    Query(params): Query<RangeParams>,
) -> Result<Json<Vec<ReadingDto>>, ApiError> {
    let from = parse_bound(&params.from, "from")?;
    let to = parse_bound(&params.to, "to")?;

    let readings = ctx.readings.range(ReadingRangeInput { from, to }).await?;
    Ok(Json(readings.into_iter().map(ReadingDto::from).collect()))
}

/// GET /api/gas/latest — most recent sample, or null.
pub async fn latest_reading(
    State(ctx): State<AppContext>,
) -> Result<Json<Option<ReadingDto>>, ApiError> {
    let latest = ctx.readings.latest().await?;
    Ok(Json(latest.map(ReadingDto::from)))
}

#[derive(Debug, Deserialize)]
pub struct ControlBody {
    pub action: String,
    pub mode: Option<String>,
}

fn parse_mode(raw: Option<&str>) -> Result<CommandMode, DomainError> {
    match raw {
        None | Some("manual") => Ok(CommandMode::Manual),
        Some("auto") => Ok(CommandMode::Auto),
        Some(other) => Err(DomainError::InvalidCommand(format!(
            "unknown mode: {other}"
        ))),
    }
}

/// POST /api/control — relay a buzzer command. Unknown actions are
/// rejected before any relay attempt.
pub async fn relay_command(
    State(ctx): State<AppContext>,
    Json(body): Json<ControlBody>,
) -> Result<Json<Value>, ApiError> {
    let kind = CommandKind::from_action(&body.action).ok_or_else(|| {
        DomainError::InvalidCommand(format!("unknown action: {}", body.action))
    })?;
    let mode = parse_mode(body.mode.as_deref())?;

    let receipt = ctx.relay.relay(RelayCommandInput { kind, mode }).await?;
    Ok(Json(json!({
        "message": "sent",
        "deviceReply": receipt.device_reply,
    })))
}

/// GET /api/control — last issued command per mode; the device polls
/// this to catch up after being offline.
pub async fn command_states(State(ctx): State<AppContext>) -> Json<Value> {
    let states = ctx.relay.last_states().await;
    Json(json!({
        "manual": states.manual.as_action(),
        "auto": states.auto.as_action(),
    }))
}

/// GET /api/device/status — never reports a storage failure as
/// "disconnected"; those become a 500 instead.
pub async fn device_status(State(ctx): State<AppContext>) -> Result<Json<Value>, ApiError> {
    let snapshot = ctx.tracker.status().await?;
    Ok(Json(json!({
        "status": snapshot.status.as_str(),
        "connectionCount": snapshot.connection_count,
    })))
}

/// POST /api/device/connect — idempotent reconnect signal.
pub async fn device_connect(State(ctx): State<AppContext>) -> Result<Json<Value>, ApiError> {
    ctx.tracker.connect().await?;
    Ok(Json(json!({ "message": "connected" })))
}

/// POST /api/device/disconnect — idempotent disconnect signal.
pub async fn device_disconnect(State(ctx): State<AppContext>) -> Result<Json<Value>, ApiError> {
    ctx.tracker.disconnect().await?;
    Ok(Json(json!({ "message": "disconnected" })))
}

#[derive(Debug, Deserialize)]
pub struct ThresholdBody {
    pub threshold: f64,
}

/// POST /api/threshold — upsert the alarm threshold.
pub async fn set_threshold(
    State(ctx): State<AppContext>,
    Json(body): Json<ThresholdBody>,
) -> Result<Json<Value>, ApiError> {
    let value = ctx.thresholds.set(body.threshold).await?;
    Ok(Json(json!({ "threshold": value })))
}

/// GET /api/threshold — stored value or the documented default.
pub async fn get_threshold(State(ctx): State<AppContext>) -> Result<Json<Value>, ApiError> {
    let value = ctx.thresholds.get().await?;
    Ok(Json(json!({ "threshold": value })))
}
