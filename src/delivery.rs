//! Config delivery page: the server embeds the config text and plan name as
//! JSON-encoded page data, the user gets them back as a named `.conf` file.

use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::SecureLinkError;
use crate::logger;
use crate::page::Region;
use crate::view::Fragment;

pub const DELIVERY_READY: &str = "Configuration ready!";
pub const DELIVERY_FAILED: &str = "Failed to load configuration";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveredConfig {
    pub config_text: String,
    pub plan: String,
}

impl DeliveredConfig {
    /// Decodes the embedded page data. Either value missing, `null` or empty
    /// means there is nothing to deliver.
    pub fn from_page_data(
        config_json: Option<&str>,
        plan_json: Option<&str>,
    ) -> Result<Self, SecureLinkError> {
        let config_text = decode_field(config_json)?;
        let plan = decode_field(plan_json)?;

        match (config_text, plan) {
            (Some(config_text), Some(plan)) => Ok(Self { config_text, plan }),
            _ => Err(SecureLinkError::MissingDeliveryData),
        }
    }

    /// `securelink_<plan without whitespace>.conf`
    pub fn file_name(&self) -> String {
        let plan: String = self.plan.chars().filter(|c| !c.is_whitespace()).collect();
        format!("securelink_{}.conf", plan)
    }

    pub fn link_label(&self) -> String {
        format!("Download config ({})", self.plan)
    }

    /// Writes the config under [`Self::file_name`] inside `dir`.
    pub fn save_to(&self, dir: &Path) -> Result<PathBuf, SecureLinkError> {
        let path = dir.join(self.file_name());
        fs::write(&path, &self.config_text)
            .map_err(|err| SecureLinkError::Storage(format!("{}: {}", path.display(), err)))?;
        Ok(path)
    }
}

fn decode_field(raw: Option<&str>) -> Result<Option<String>, SecureLinkError> {
    let Some(raw) = raw.filter(|raw| !raw.trim().is_empty()) else {
        return Ok(None);
    };

    let value: Option<String> =
        serde_json::from_str(raw).map_err(|err| SecureLinkError::FailedToDecode(err.to_string()))?;
    Ok(value.filter(|value| !value.is_empty()))
}

/// Decodes the page data and reports the outcome on the status line.
pub fn present(
    status: &dyn Region,
    config_json: Option<&str>,
    plan_json: Option<&str>,
) -> Result<DeliveredConfig, SecureLinkError> {
    match DeliveredConfig::from_page_data(config_json, plan_json) {
        Ok(delivered) => {
            status.render(Fragment::Text(DELIVERY_READY.to_string()));
            Ok(delivered)
        }
        Err(err) => {
            logger::error("DELIVERY", &format!("No config to deliver: {}", err));
            status.render(Fragment::Error(DELIVERY_FAILED.to_string()));
            Err(err)
        }
    }
}
