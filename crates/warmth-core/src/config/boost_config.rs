use serde::{Deserialize, Serialize};

use super::defaults;
use crate::models::Channel;

/// Interaction boost configuration: impulse points added per channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BoostConfig {
    pub email: f64,
    pub sms: f64,
    pub dm: f64,
    pub call: f64,
    pub meeting: f64,
    pub note: f64,
    pub other: f64,
    /// Interactions dated further than this into the future are rejected.
    pub max_future_skew_secs: u64,
}

impl BoostConfig {
    pub fn impulse(&self, channel: Channel) -> f64 {
        match channel {
            Channel::Email => self.email,
            Channel::Sms => self.sms,
            Channel::Dm => self.dm,
            Channel::Call => self.call,
            Channel::Meeting => self.meeting,
            Channel::Note => self.note,
            Channel::Other => self.other,
        }
    }

    pub(crate) fn impulses(&self) -> [(&'static str, f64); 7] {
        [
            ("boost.email", self.email),
            ("boost.sms", self.sms),
            ("boost.dm", self.dm),
            ("boost.call", self.call),
            ("boost.meeting", self.meeting),
            ("boost.note", self.note),
            ("boost.other", self.other),
        ]
    }
}

impl Default for BoostConfig {
    fn default() -> Self {
        Self {
            email: defaults::DEFAULT_IMPULSE_EMAIL,
            sms: defaults::DEFAULT_IMPULSE_SMS,
            dm: defaults::DEFAULT_IMPULSE_DM,
            call: defaults::DEFAULT_IMPULSE_CALL,
            meeting: defaults::DEFAULT_IMPULSE_MEETING,
            note: defaults::DEFAULT_IMPULSE_NOTE,
            other: defaults::DEFAULT_IMPULSE_OTHER,
            max_future_skew_secs: defaults::DEFAULT_MAX_FUTURE_SKEW_SECS,
        }
    }
}
