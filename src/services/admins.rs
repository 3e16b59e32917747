//! Admin provisioning: make sure named users exist and hold the Admin role.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::clients::GraylogClient;
use crate::config::MissingUserPolicy;
use crate::error::Result;

/// What `set_admin` had to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Promotion {
    Created,
    Promoted,
    AlreadyAdmin,
}

impl fmt::Display for Promotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Created => "created",
            Self::Promoted => "promoted",
            Self::AlreadyAdmin => "already admin",
        };
        write!(f, "{s}")
    }
}

/// Ensures `name` exists and has the Admin role, in at most two calls.
///
/// With [`MissingUserPolicy::AnyError`] every fetch failure, including auth
/// and network errors, leads to a create attempt whose result is returned.
pub async fn set_admin(
    client: &GraylogClient,
    name: &str,
    policy: MissingUserPolicy,
) -> Result<Promotion> {
    let mut user = match client.get_user(name).await {
        Ok(user) => user,
        Err(e) if policy == MissingUserPolicy::NotFoundOnly && !e.is_not_found() => {
            return Err(e);
        }
        Err(e) => {
            debug!(user = %name, error = %e, "Fetch failed, creating user");
            client.create_user(name).await?;
            return Ok(Promotion::Created);
        }
    };

    if !user.grant_admin() {
        return Ok(Promotion::AlreadyAdmin);
    }

    client.edit_user(&user).await?;
    Ok(Promotion::Promoted)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PromotionReport {
    pub created: usize,
    pub promoted: usize,
    pub unchanged: usize,
    pub failed: usize,
}

/// Runs `set_admin` for each name in order. Failures are logged and
/// counted; they never stop the remaining names.
pub async fn promote_all<S>(
    client: &GraylogClient,
    names: &[S],
    policy: MissingUserPolicy,
) -> PromotionReport
where
    S: AsRef<str>,
{
    let mut report = PromotionReport::default();

    for name in names {
        let name = name.as_ref();
        match set_admin(client, name, policy).await {
            Ok(outcome) => {
                info!(user = %name, outcome = %outcome, "Admin ensured");
                match outcome {
                    Promotion::Created => report.created += 1,
                    Promotion::Promoted => report.promoted += 1,
                    Promotion::AlreadyAdmin => report.unchanged += 1,
                }
            }
            Err(e) => {
                error!(user = %name, error = %e, "Failed to set admin");
                report.failed += 1;
            }
        }
    }

    report
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    Ready,
    Cancelled,
}

/// Polls the API every `interval` until it answers or `shutdown` resolves.
///
/// There is no attempt limit; bound it through `shutdown`.
pub async fn wait_for_api<F>(
    client: &GraylogClient,
    interval: Duration,
    shutdown: F,
) -> WaitOutcome
where
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);

    loop {
        let probe = tokio::select! {
            () = &mut shutdown => return WaitOutcome::Cancelled,
            result = client.api_reachable() => result,
        };

        match probe {
            Ok(()) => {
                info!(url = %client.base_url(), "Graylog API is reachable");
                return WaitOutcome::Ready;
            }
            Err(e) => {
                warn!(
                    error = %e,
                    "Graylog API not ready, sleeping for {} seconds...",
                    interval.as_secs_f32()
                );
            }
        }

        tokio::select! {
            () = &mut shutdown => return WaitOutcome::Cancelled,
            () = tokio::time::sleep(interval) => {}
        }
    }
}
