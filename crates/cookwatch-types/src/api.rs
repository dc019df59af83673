use serde::Serialize;

/// One point of a per-session time series, as returned by
/// `/dashboard/api/{kind}/{session_number}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint<V> {
    pub datetime: String,
    pub value: V,
}

pub type TemperaturePoint = SeriesPoint<f64>;
pub type MotionPoint = SeriesPoint<bool>;

/// Answer to a closest-sample query.
///
/// `index` is the position of the sample in the ascending series. Only the
/// temperature endpoint reports it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClosestSample<V> {
    pub datetime: String,
    pub value: V,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiError {
    pub error: String,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Closest-query endpoints always answer 200; failures travel as `{error}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ClosestResponse<V> {
    Found(ClosestSample<V>),
    Error(ApiError),
}
