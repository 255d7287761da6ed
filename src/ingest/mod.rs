/// Observation sources.
///
/// Submodules:
/// - `nws`     — api.weather.gov latest observation, parsed for the classifier.
/// - `checkwx` — secondary provider that reports a pre-computed category.

pub mod checkwx;
pub mod nws;
