//! Stream monitoring: sliding-window anomaly watch, market signal helpers
//! and descriptive statistics.

pub mod signals;
pub mod stats;
pub mod stream_watch;

pub use signals::{
    classify_signal_levels, detect_outliers, fetch_market_signals, market_direction,
    refine_signals, signal_strength, DataPoint, MarketDirection, SignalLevel,
};
pub use stats::{
    calculate_entropy, calculate_kurtosis, calculate_skewness, detect_anomaly, detect_spike,
    exponential_smoothing, generate_features, get_extremes, moving_average,
    rolling_window_features, DayPhase, FeatureSummary,
};
pub use stream_watch::{
    detect_anomalous_patterns, StreamWatch, WatchStatus, WindowStats, DEFAULT_MULTIPLIER,
    DEFAULT_WINDOW,
};
