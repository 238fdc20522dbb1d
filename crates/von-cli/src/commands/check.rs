//! `von-connector check` — Open a role, report its DID, close it again.

use clap::Args;
use von_connector::{Connector, ConnectorError, Role, RoleWrapper};
use von_core::{ConnectorConfig, RoleKind};
use von_sdk::{Agent, LocalPool, LocalSdk, NodePool};

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Role to open (issuer, verifier, holder).
    #[arg(short, long, default_value = "issuer")]
    pub role: RoleKind,
}

pub async fn run(config: ConnectorConfig, args: &CheckArgs) -> anyhow::Result<()> {
    let connector = Connector::init(LocalSdk, config)?;
    connector.genesis().ensure().await?;

    println!("Service: {}", connector.config().name);
    match args.role {
        RoleKind::Issuer => report(&connector.issuer()).await,
        RoleKind::Verifier => report(&connector.verifier()).await,
        RoleKind::Holder => report(&connector.holder()).await,
    }
}

async fn report<R: Role<LocalSdk>>(wrapper: &RoleWrapper<LocalSdk, R>) -> anyhow::Result<()> {
    let pool: &LocalPool = wrapper.pool();
    let pool_name = pool.name().to_string();

    let (did, nodes) = wrapper
        .run(|agent| async move {
            let did = agent.did().ok_or(ConnectorError::DidUnavailable)?;
            Ok::<_, ConnectorError>((did, pool.nodes()))
        })
        .await?;

    println!("Role:    {}", wrapper.kind());
    println!("Pool:    {pool_name} ({} nodes: {})", nodes.len(), nodes.join(", "));
    println!("Wallet:  {}", wrapper.instance().wallet_name());
    println!("DID:     {did}");
    Ok(())
}
