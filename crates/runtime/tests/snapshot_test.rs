//! Snapshots on disk and games resumed from them.

mod common;

use common::{SEED, play_stride, runtime};
use hexalchemy_runtime::FileSnapshotRepository;

#[tokio::test]
async fn snapshot_file_round_trip() -> anyhow::Result<()> {
    let snapshot = play_stride(SEED, 40).await;
    let dir = tempfile::tempdir()?;
    let repo = FileSnapshotRepository::new(dir.path())?;

    repo.save("autosave", &snapshot)?;
    assert!(repo.exists("autosave"));
    assert_eq!(repo.list()?, vec!["autosave".to_string()]);

    let loaded = repo.load("autosave")?.expect("slot was just written");
    assert_eq!(loaded, snapshot);
    assert_eq!(loaded.digest()?, snapshot.digest()?);

    let json = repo.export_json("autosave", &snapshot)?;
    assert!(json.exists());
    // The readable copy is not a slot.
    assert_eq!(repo.list()?, vec!["autosave".to_string()]);

    repo.delete("autosave")?;
    assert!(repo.load("autosave")?.is_none());
    Ok(())
}

#[tokio::test]
async fn loaded_snapshot_resumes_at_its_prompt() -> anyhow::Result<()> {
    let snapshot = play_stride(SEED, 40).await;
    let dir = tempfile::tempdir()?;
    let repo = FileSnapshotRepository::new(dir.path())?;
    repo.save("slot-1", &snapshot)?;
    let loaded = repo.load("slot-1")?.expect("slot exists");

    let mut runtime = runtime();
    let handle = runtime.handle();
    runtime.resume(loaded.clone()).await?;

    let pending = handle.next_prompt().await?;
    assert_eq!(
        pending.prompt.key.to_string(),
        loaded.prompt_number.to_string()
    );

    let committed = handle.snapshot().expect("resume commits the snapshot");
    assert_eq!(committed.state, loaded.state);
    assert_eq!(committed.history, loaded.history);
    assert_eq!(committed.digest()?, loaded.digest()?);

    runtime.shutdown().await?;
    Ok(())
}
