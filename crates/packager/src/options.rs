use serde::{Deserialize, Serialize};

use crate::{MpdError, MpdResult};

/// DASH profile advertised in `MPD@profiles`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DashProfile {
    #[default]
    OnDemand,
    Live,
}

/// `MPD@type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MpdType {
    /// A finished presentation with a fixed duration.
    #[default]
    Static,
    /// An ongoing presentation which is refreshed by the player.
    Dynamic,
}

/// Numeric MPD parameters in seconds. A value `<= 0` means the parameter is unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MpdParams {
    pub min_buffer_time: f64,
    pub minimum_update_period: f64,
    pub time_shift_buffer_depth: f64,
    pub suggested_presentation_delay: f64,
}

impl Default for MpdParams {
    fn default() -> Self {
        Self {
            min_buffer_time: 2.0,
            minimum_update_period: 0.0,
            time_shift_buffer_depth: 0.0,
            suggested_presentation_delay: 0.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MpdOptions {
    pub dash_profile: DashProfile,
    pub mpd_type: MpdType,
    pub mpd_params: MpdParams,
}

impl MpdOptions {
    pub fn new(dash_profile: DashProfile, mpd_type: MpdType) -> Self {
        Self {
            dash_profile,
            mpd_type,
            mpd_params: MpdParams::default(),
        }
    }

    /// Parse options from a JSON document, e.g. one loaded from a config file.
    ///
    /// Unknown `dash_profile` / `mpd_type` strings are rejected here, so a
    /// constructed [`MpdOptions`] can only ever hold a known profile and type.
    pub fn from_json(json: &str) -> MpdResult<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> MpdResult<()> {
        let params = [
            ("min_buffer_time", self.mpd_params.min_buffer_time),
            ("minimum_update_period", self.mpd_params.minimum_update_period),
            (
                "time_shift_buffer_depth",
                self.mpd_params.time_shift_buffer_depth,
            ),
            (
                "suggested_presentation_delay",
                self.mpd_params.suggested_presentation_delay,
            ),
        ];
        for (name, value) in params {
            if !value.is_finite() {
                return Err(MpdError::InvalidOptions(format!(
                    "{name} must be a finite number of seconds, got {value}"
                )));
            }
        }
        Ok(())
    }
}
