use std::fs;

use pretty_assertions::assert_eq;
use routelint::snapshot::SnapshotRepository;
use tempfile::TempDir;

fn repo(dir: &TempDir) -> SnapshotRepository {
    SnapshotRepository::new(dir.path().join("snapshots"))
}

#[test]
fn empty_root_seeds_a_placeholder_default_snapshot() {
    let dir = TempDir::new().unwrap();
    let repo = repo(&dir);
    assert!(repo.list_snapshots().unwrap().is_empty());

    let snapshot = repo.seed_default_snapshot().unwrap();

    assert_eq!(snapshot.name, "default");
    let placeholder = snapshot.path.join("configs/minimal.cfg");
    let content = fs::read_to_string(&placeholder).unwrap();
    assert!(content.contains("hostname"));
    assert!(content.contains("interface Loopback0"));

    assert_eq!(repo.list_snapshots().unwrap(), vec!["default"]);
}

#[test]
fn first_sample_with_files_wins() {
    let dir = TempDir::new().unwrap();
    let repo = repo(&dir);
    let bgp = repo.root().join("bgp_duplicated/configs");
    let ospf = repo.root().join("ospf_duplicated/configs");
    fs::create_dir_all(&bgp).unwrap();
    fs::create_dir_all(&ospf).unwrap();
    fs::write(bgp.join("r1.cfg"), "hostname r1\n").unwrap();
    fs::write(ospf.join("r2.cfg"), "hostname r2\n").unwrap();

    let snapshot = repo.seed_default_snapshot().unwrap();

    assert!(snapshot.path.join("configs/r1.cfg").is_file());
    assert!(!snapshot.path.join("configs/r2.cfg").exists());
    assert!(!snapshot.path.join("configs/minimal.cfg").exists());
}

#[test]
fn empty_first_sample_falls_through_to_the_second() {
    let dir = TempDir::new().unwrap();
    let repo = repo(&dir);
    fs::create_dir_all(repo.root().join("bgp_duplicated/configs")).unwrap();
    let ospf = repo.root().join("ospf_duplicated/configs");
    fs::create_dir_all(&ospf).unwrap();
    fs::write(ospf.join("r2.cfg"), "hostname r2\n").unwrap();

    let snapshot = repo.seed_default_snapshot().unwrap();

    assert!(snapshot.path.join("configs/r2.cfg").is_file());
}

#[test]
fn sample_legacy_config_dir_is_used_as_fallback() {
    let dir = TempDir::new().unwrap();
    let repo = repo(&dir);
    let legacy = repo.root().join("bgp_duplicated/config");
    fs::create_dir_all(&legacy).unwrap();
    fs::write(legacy.join("r1.cfg"), "hostname r1\n").unwrap();

    let snapshot = repo.seed_default_snapshot().unwrap();

    assert!(snapshot.path.join("configs/r1.cfg").is_file());
    assert!(!snapshot.path.join("configs/minimal.cfg").exists());
}

#[test]
fn populated_default_snapshot_is_left_alone() {
    let dir = TempDir::new().unwrap();
    let repo = repo(&dir);
    let configs = repo.root().join("default/configs");
    fs::create_dir_all(&configs).unwrap();
    fs::write(configs.join("mine.cfg"), "hostname mine\n").unwrap();

    let snapshot = repo.seed_default_snapshot().unwrap();

    assert_eq!(
        fs::read_to_string(snapshot.path.join("configs/mine.cfg")).unwrap(),
        "hostname mine\n"
    );
    let entries: Vec<_> = fs::read_dir(snapshot.path.join("configs"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(entries, vec!["mine.cfg"]);
}

#[test]
fn seeding_twice_is_stable() {
    let dir = TempDir::new().unwrap();
    let repo = repo(&dir);

    let first = repo.seed_default_snapshot().unwrap();
    let second = repo.seed_default_snapshot().unwrap();

    assert_eq!(first, second);
    let entries: Vec<_> = fs::read_dir(first.path.join("configs"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(entries, vec!["minimal.cfg"]);
}
