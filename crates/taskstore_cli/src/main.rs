//! Task store smoke runner.
//!
//! # Responsibility
//! - Select a backend from `TASKSTORE_*` variables the way a server would.
//! - Drive one task through create, get, update, list and delete via the
//!   repository trait, printing deterministic `key=value` lines.

use anyhow::{bail, Context, Result};
use log::info;
use taskstore_core::{
    core_version, init_logging, open_repository, ErrorKind, LogConfig, StoreConfig, TaskDraft,
};

fn main() -> Result<()> {
    if let Some(log_config) = LogConfig::from_env() {
        init_logging(&log_config).context("failed to initialize logging")?;
    }

    let store_config = StoreConfig::from_env().context("invalid store configuration")?;
    let repo = open_repository(&store_config).context("failed to open task store")?;

    println!("taskstore version={}", core_version());
    println!("taskstore backend={}", store_config.backend_name());

    let created = repo.create_task(&TaskDraft::new("smoke check", "created by taskstore_cli"))?;
    println!(
        "create id={} completed={} created_at={}",
        created.id, created.completed, created.created_at
    );

    let fetched = repo.get_task(&created.id)?;
    if fetched != created {
        bail!("stored task {} does not match the created one", created.id);
    }

    let updated = repo.update_task(
        &created.id,
        &TaskDraft::new("smoke check", "updated by taskstore_cli").with_completed(true),
    )?;
    println!(
        "update id={} completed={} created_at_preserved={}",
        updated.id,
        updated.completed,
        updated.created_at == created.created_at
    );

    println!("list count={}", repo.get_all_tasks()?.len());

    repo.delete_task(&created.id)?;
    match repo.get_task(&created.id) {
        Err(err) if err.kind() == ErrorKind::NotFound => println!("delete id={}", created.id),
        Err(err) => return Err(err).context("lookup after delete failed"),
        Ok(_) => bail!("task {} is still readable after delete", created.id),
    }

    info!("event=smoke_run module=cli status=ok");
    Ok(())
}
