//! Role wrappers and their scoped lifecycle.

use std::fmt;
use std::future::Future;
use std::ops::Deref;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex};

use futures::FutureExt;
use tokio::task::JoinHandle;
use von_core::{ConnectorConfig, GenesisLocator, RoleKind, WalletSeed};
use von_sdk::{Agent, NodePool, Sdk, WalletConfig, WalletCredentials, WalletOptions};

use crate::error::ConnectorError;
use crate::role::{HolderRole, IssuerRole, Role, VerifierRole};

pub type Issuer<S> = RoleWrapper<S, IssuerRole>;
pub type Verifier<S> = RoleWrapper<S, VerifierRole>;
pub type Holder<S> = RoleWrapper<S, HolderRole>;

/// Teardown spawned by a guard dropped without `close()`.
type PendingTeardown = Arc<Mutex<Option<JoinHandle<()>>>>;

/// A role's pool and agent, built but not yet opened.
pub struct RoleWrapper<S: Sdk, R: Role<S>> {
    pool: Arc<S::Pool>,
    instance: Arc<R::Instance>,
    pending: PendingTeardown,
}

impl<S: Sdk, R: Role<S>> RoleWrapper<S, R> {
    /// Build the pool and wallet handles for this role. Performs no I/O.
    pub fn new(
        sdk: &S,
        config: &ConnectorConfig,
        seed: &WalletSeed,
        genesis: &GenesisLocator,
    ) -> Self {
        let kind = R::KIND;
        let pool = sdk.pool(&config.pool_name(kind), genesis.path());

        let options = WalletOptions {
            freshness_time: config.wallet.freshness_time,
        };
        let credentials = WalletCredentials {
            key: config.wallet.key.clone(),
        };
        tracing::debug!(
            role = %kind,
            pool = %pool.name(),
            wallet_type = %config.wallet.wallet_type,
            freshness_time = options.freshness_time,
            "building role wrapper"
        );

        let wallet = WalletConfig::new(
            pool.name(),
            seed.expose(),
            config.wallet_display_name(kind),
        )
        .with_type(config.wallet.wallet_type.clone())
        .with_options(options)
        .with_credentials(credentials);

        let instance = Arc::new(R::build(sdk, Arc::clone(&pool), wallet));
        Self {
            pool,
            instance,
            pending: Arc::new(Mutex::new(None)),
        }
    }

    pub fn kind(&self) -> RoleKind {
        R::KIND
    }

    /// The role's pool handle.
    pub fn pool(&self) -> &Arc<S::Pool> {
        &self.pool
    }

    /// The role's agent, whether or not it is open.
    pub fn instance(&self) -> &Arc<R::Instance> {
        &self.instance
    }

    /// Open the pool, then the agent, then run the role's post-open hook.
    ///
    /// Waits for the teardown of a previously dropped guard first. If a later
    /// step fails, whatever already opened is closed again before the error
    /// is returned.
    pub async fn open(&self) -> Result<RoleGuard<S, R>, ConnectorError> {
        let kind = R::KIND;
        self.await_pending_teardown(kind).await;
        tracing::debug!(role = %kind, pool = %self.pool.name(), "entering role scope");

        self.pool.open().await?;

        if let Err(e) = self.instance.open().await {
            self.close_pool_quietly(kind).await;
            return Err(e.into());
        }

        if let Err(e) = R::on_open(&*self.instance).await {
            if let Err(close_err) = self.instance.close().await {
                tracing::warn!(role = %kind, error = %close_err, "agent close failed after open hook error");
            }
            self.close_pool_quietly(kind).await;
            return Err(e.into());
        }

        Ok(RoleGuard {
            kind,
            pool: Arc::clone(&self.pool),
            instance: Arc::clone(&self.instance),
            pending: Arc::clone(&self.pending),
            closed: false,
        })
    }

    async fn await_pending_teardown(&self, kind: RoleKind) {
        let pending = self
            .pending
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();
        if let Some(handle) = pending {
            tracing::debug!(role = %kind, "waiting for deferred teardown");
            if let Err(e) = handle.await {
                tracing::warn!(role = %kind, error = %e, "deferred teardown task failed");
            }
        }
    }

    async fn close_pool_quietly(&self, kind: RoleKind) {
        if let Err(e) = self.pool.close().await {
            tracing::warn!(role = %kind, error = %e, "pool close failed after open error");
        }
    }

    /// Run `f` against the open agent, tearing down afterwards no matter what.
    ///
    /// A failure inside `f` is logged and returned unchanged once teardown
    /// finishes; a panic inside `f` resumes after teardown. Teardown errors
    /// are returned only when `f` itself succeeded.
    pub async fn run<F, Fut, T, E>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(Arc<R::Instance>) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: From<ConnectorError> + fmt::Display,
    {
        let kind = R::KIND;
        let guard = self.open().await?;
        let instance = Arc::clone(guard.instance());

        let outcome = AssertUnwindSafe(async move { f(instance).await })
            .catch_unwind()
            .await;

        match &outcome {
            Ok(Err(e)) => tracing::error!(
                role = %kind,
                error_type = std::any::type_name::<E>(),
                error = %e,
                "error inside role scope"
            ),
            Err(_) => tracing::error!(role = %kind, "panic inside role scope"),
            Ok(Ok(_)) => {}
        }

        let closed = guard.close().await;

        match outcome {
            Ok(Ok(value)) => {
                closed?;
                Ok(value)
            }
            Ok(Err(e)) => {
                if let Err(close_err) = closed {
                    tracing::warn!(role = %kind, error = %close_err, "teardown failed after scope error");
                }
                Err(e)
            }
            Err(panic) => {
                if let Err(close_err) = closed {
                    tracing::warn!(role = %kind, error = %close_err, "teardown failed after scope panic");
                }
                std::panic::resume_unwind(panic)
            }
        }
    }
}

/// An open role. Derefs to the agent.
///
/// [`RoleGuard::close`] closes the agent, then the pool. A guard dropped
/// without closing schedules the same teardown on the current tokio runtime;
/// the next [`RoleWrapper::open`] waits for it to finish.
pub struct RoleGuard<S: Sdk, R: Role<S>> {
    kind: RoleKind,
    pool: Arc<S::Pool>,
    instance: Arc<R::Instance>,
    pending: PendingTeardown,
    closed: bool,
}

impl<S: Sdk, R: Role<S>> RoleGuard<S, R> {
    pub fn kind(&self) -> RoleKind {
        self.kind
    }

    /// Shared handle to the open agent.
    pub fn instance(&self) -> &Arc<R::Instance> {
        &self.instance
    }

    /// Close the agent, then the pool. Both are attempted; the first error wins.
    pub async fn close(mut self) -> Result<(), ConnectorError> {
        self.closed = true;
        teardown(self.kind, &*self.instance, &*self.pool).await
    }
}

impl<S: Sdk, R: Role<S>> Deref for RoleGuard<S, R> {
    type Target = R::Instance;

    fn deref(&self) -> &R::Instance {
        &self.instance
    }
}

impl<S: Sdk, R: Role<S>> Drop for RoleGuard<S, R> {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        let kind = self.kind;
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                tracing::warn!(role = %kind, "role guard dropped without close, scheduling teardown");
                let pool = Arc::clone(&self.pool);
                let instance = Arc::clone(&self.instance);
                let task = handle.spawn(async move {
                    if let Err(e) = teardown(kind, &*instance, &*pool).await {
                        tracing::warn!(role = %kind, error = %e, "deferred teardown failed");
                    }
                });
                *self.pending.lock().unwrap_or_else(|e| e.into_inner()) = Some(task);
            }
            Err(_) => {
                tracing::warn!(role = %kind, "role guard dropped outside a runtime, left open");
            }
        }
    }
}

async fn teardown<A, P>(kind: RoleKind, instance: &A, pool: &P) -> Result<(), ConnectorError>
where
    A: Agent + ?Sized,
    P: NodePool + ?Sized,
{
    tracing::debug!(role = %kind, pool = %pool.name(), "exiting role scope");

    let instance_result = instance.close().await;
    let pool_result = pool.close().await;

    if let (Err(_), Err(e)) = (&instance_result, &pool_result) {
        tracing::warn!(role = %kind, error = %e, "pool close failed after agent close error");
    }
    instance_result?;
    pool_result?;
    Ok(())
}
