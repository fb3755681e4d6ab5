//! Bounded retry protocol for the engine action endpoint.
//!
//! The vendor's action service fails transiently; the gateway re-issues the
//! identical command a fixed number of times before reporting the failure
//! to the caller. Attempts are strictly sequential, with no delay between
//! them beyond the vendor's own latency, so a single request never has two
//! commands in flight for the same vehicle.

use thiserror::Error;
use tracing::{debug, warn};

use crate::core::normalize::{self, NormalizeError};
use crate::core::types::{ActionResult, ActionStatus, EngineAction};
use crate::core::vendor::wire::EngineCommand;
use crate::core::vendor::{VehicleVendor, VendorError};

/// Additional attempts allowed after the initial vendor call.
pub const ACTION_RETRY_BUDGET: u32 = 5;

const MAX_ATTEMPTS: u32 = ACTION_RETRY_BUDGET + 1;

/// Failures that abort the retry loop. An exhausted budget is not one of
/// them; that path returns a normal `FAILED` result.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("vendor reports no such vehicle")]
    VehicleNotFound,
    #[error(transparent)]
    Vendor(#[from] VendorError),
    #[error("malformed vendor payload: {0}")]
    Malformed(String),
}

impl From<NormalizeError> for ActionError {
    fn from(err: NormalizeError) -> Self {
        match err {
            NormalizeError::VehicleNotFound => ActionError::VehicleNotFound,
            NormalizeError::Malformed(detail) => ActionError::Malformed(detail),
            // The action service has no energy semantics; anything else is
            // vendor data we cannot interpret.
            other => ActionError::Malformed(other.to_string()),
        }
    }
}

/// Issue `action` for `id`, retrying transient `FAILED` results.
///
/// Terminates in at most [`ACTION_RETRY_BUDGET`] + 1 vendor calls: the loop
/// returns on the first `EXECUTED`, immediately on an unknown vehicle
/// (retrying cannot make it exist), and with the last observed `FAILED`
/// once the budget is spent.
pub async fn perform_action<V>(
    vendor: &V,
    id: &str,
    action: EngineAction,
) -> Result<ActionResult, ActionError>
where
    V: VehicleVendor + ?Sized,
{
    let command = EngineCommand::from(action);
    let mut attempt = 0;

    loop {
        attempt += 1;

        let envelope = vendor.engine_action(id, command).await?;
        let result = normalize::action_result(envelope)?;

        match result.status {
            ActionStatus::Executed => {
                if attempt > 1 {
                    debug!(id, attempt, command = command.as_str(), "engine action succeeded after retry");
                }
                return Ok(result);
            }
            ActionStatus::Failed if attempt >= MAX_ATTEMPTS => {
                warn!(id, attempts = attempt, command = command.as_str(), "engine action still failing, returning last result");
                return Ok(result);
            }
            ActionStatus::Failed => {
                debug!(id, attempt, command = command.as_str(), "engine action failed, retrying");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    use async_trait::async_trait;
    use serde_json::json;

    use crate::core::vendor::wire::{ActionEnvelope, EnergyData, Envelope, InfoData, SecurityData};

    /// Vendor double that fails a scripted number of action attempts.
    struct ScriptedVendor {
        calls: AtomicU32,
        failures_before_success: u32,
        known_vehicle: bool,
    }

    impl ScriptedVendor {
        fn failing(failures_before_success: u32) -> Self {
            Self {
                calls: AtomicU32::new(0),
                failures_before_success,
                known_vehicle: true,
            }
        }

        fn unknown_vehicle() -> Self {
            Self {
                calls: AtomicU32::new(0),
                failures_before_success: 0,
                known_vehicle: false,
            }
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl VehicleVendor for ScriptedVendor {
        async fn vehicle_info(&self, _id: &str) -> Result<Envelope<InfoData>, VendorError> {
            unimplemented!("not used by the retry engine")
        }

        async fn security_status(&self, _id: &str) -> Result<Envelope<SecurityData>, VendorError> {
            unimplemented!("not used by the retry engine")
        }

        async fn energy_level(&self, _id: &str) -> Result<Envelope<EnergyData>, VendorError> {
            unimplemented!("not used by the retry engine")
        }

        async fn engine_action(
            &self,
            _id: &str,
            _command: EngineCommand,
        ) -> Result<ActionEnvelope, VendorError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;

            let body = if !self.known_vehicle {
                json!({ "status": "404", "reason": "Vehicle id: 12345 not found." })
            } else if call <= self.failures_before_success {
                json!({ "status": "200", "actionResult": { "status": "FAILED" } })
            } else {
                json!({ "status": "200", "actionResult": { "status": "EXECUTED" } })
            };

            Ok(serde_json::from_value(body).expect("scripted envelope"))
        }
    }

    #[tokio::test]
    async fn immediate_success_uses_one_call() {
        let vendor = ScriptedVendor::failing(0);
        let result = perform_action(&vendor, "1234", EngineAction::Start)
            .await
            .unwrap();

        assert_eq!(result.status, ActionStatus::Executed);
        assert_eq!(vendor.calls(), 1);
    }

    #[tokio::test]
    async fn success_after_k_failures_uses_k_plus_one_calls() {
        for k in 1..=ACTION_RETRY_BUDGET {
            let vendor = ScriptedVendor::failing(k);
            let result = perform_action(&vendor, "1234", EngineAction::Start)
                .await
                .unwrap();

            assert_eq!(result.status, ActionStatus::Executed, "k = {k}");
            assert_eq!(vendor.calls(), k + 1, "k = {k}");
        }
    }

    #[tokio::test]
    async fn exhausted_budget_returns_failed_after_six_calls() {
        let vendor = ScriptedVendor::failing(u32::MAX);
        let result = perform_action(&vendor, "1234", EngineAction::Stop)
            .await
            .unwrap();

        assert_eq!(result.status, ActionStatus::Failed);
        assert_eq!(vendor.calls(), ACTION_RETRY_BUDGET + 1);
    }

    #[tokio::test]
    async fn unknown_vehicle_fails_without_retry() {
        let vendor = ScriptedVendor::unknown_vehicle();
        let err = perform_action(&vendor, "12345", EngineAction::Start)
            .await
            .unwrap_err();

        assert!(matches!(err, ActionError::VehicleNotFound));
        assert_eq!(vendor.calls(), 1);
    }

    #[tokio::test]
    async fn transport_errors_abort_the_loop() {
        struct BrokenVendor;

        #[async_trait]
        impl VehicleVendor for BrokenVendor {
            async fn vehicle_info(&self, _id: &str) -> Result<Envelope<InfoData>, VendorError> {
                unimplemented!()
            }

            async fn security_status(
                &self,
                _id: &str,
            ) -> Result<Envelope<SecurityData>, VendorError> {
                unimplemented!()
            }

            async fn energy_level(&self, _id: &str) -> Result<Envelope<EnergyData>, VendorError> {
                unimplemented!()
            }

            async fn engine_action(
                &self,
                _id: &str,
                _command: EngineCommand,
            ) -> Result<ActionEnvelope, VendorError> {
                Err(VendorError::Network("connection reset".to_string()))
            }
        }

        let err = perform_action(&BrokenVendor, "1234", EngineAction::Start)
            .await
            .unwrap_err();

        assert!(matches!(err, ActionError::Vendor(_)));
    }
}
