use tracing::{info, warn};

use super::StatusLookup;

pub const ASK_FOR_NAME: &str = "Please mention the faculty name.";

/// Turns a status lookup into the sentence shown to the user.
///
/// Never fails: a store error reads the same as an unknown name.
pub struct LiveStatusResolver<S> {
    store: S,
}

impl<S: StatusLookup> LiveStatusResolver<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn resolve(&self, entity_name: Option<&str>) -> String {
        let Some(name) = entity_name else {
            return ASK_FOR_NAME.to_string();
        };

        match self.store.lookup(name).await {
            Ok(Some(status)) => {
                info!(name, status = %status, "live status found");
                format!("{name} is currently {status}.")
            }
            Ok(None) => {
                info!(name, "no live status record");
                no_status(name)
            }
            Err(e) => {
                warn!(name, error = %e, "live status lookup failed");
                no_status(name)
            }
        }
    }
}

fn no_status(name: &str) -> String {
    format!("I don't have live status for {name}.")
}
