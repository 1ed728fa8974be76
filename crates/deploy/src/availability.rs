//! Label availability check.
//!
//! The check fails open: when the registry cannot be asked, the label is
//! assumed free and registration gets to decide. A collision then surfaces
//! as a registration error instead of a blocked deploy.

use tracing::{debug, warn};

use crate::backend::SiteBackend;
use crate::label::Label;
use crate::types::Availability;

/// Message used when the registry could not be asked.
pub const ASSUMED_AVAILABLE: &str = "Could not verify availability, assuming available";

/// Asks the registry whether `label` is free.
pub async fn check_available(backend: &dyn SiteBackend, label: &Label) -> Availability {
    match backend.check(label.as_str()).await {
        Ok(resp) => {
            let available = resp.is_available();
            let message = resp.message.filter(|m| !m.is_empty()).unwrap_or_else(|| {
                if available {
                    "Subdomain is available".to_string()
                } else {
                    format!("Subdomain '{label}' is already taken")
                }
            });
            debug!(label = %label, available, "availability checked");
            Availability {
                available,
                message,
                verified: true,
            }
        }
        Err(e) => {
            warn!(label = %label, error = %e, "availability check failed, assuming available");
            Availability {
                available: true,
                message: ASSUMED_AVAILABLE.to_string(),
                verified: false,
            }
        }
    }
}
