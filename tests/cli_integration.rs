use std::process::Command;
use tempfile::tempdir;

fn bin() -> String {
    env!("CARGO_BIN_EXE_rasterdelta").to_string()
}

fn write_inputs(dir: &std::path::Path, ranges: &str) {
    let size = 16384;
    let prev = vec![0u8; size];
    let mut next = prev.clone();
    next[100..140].fill(0x5A);
    next[300] = 0x81;
    next[0x2000..0x2004].copy_from_slice(&[1, 2, 3, 4]);
    std::fs::write(dir.join("prev.bin"), &prev).unwrap();
    std::fs::write(dir.join("next.bin"), &next).unwrap();
    std::fs::write(dir.join("ranges.txt"), ranges).unwrap();
}

fn rank_cmd(dir: &std::path::Path) -> Command {
    let mut cmd = Command::new(bin());
    cmd.arg("rank")
        .arg("--prev")
        .arg(dir.join("prev.bin"))
        .arg("--next")
        .arg(dir.join("next.bin"))
        .arg("--ranges")
        .arg(dir.join("ranges.txt"));
    cmd
}

#[test]
fn cli_rank_prints_priority_order() {
    let dir = tempdir().unwrap();
    write_inputs(dir.path(), "300 300\n0x2000-0x2003\n100+40\n");

    let out = rank_cmd(dir.path()).arg("-v").output().unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("run fill=0x5A"), "{stdout}");
    assert!(lines[1].contains("slice"), "{stdout}");
    assert!(lines[2].contains("pixels=2"), "{stdout}");
}

#[test]
fn cli_rank_split_and_json() {
    let dir = tempdir().unwrap();
    write_inputs(dir.path(), "100 139\n300 300\n");

    let out = rank_cmd(dir.path())
        .args(["--split-passes", "1", "--json", "--quiet"])
        .output()
        .unwrap();
    assert!(out.status.success());
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8(out.stderr).unwrap();
    let start = stderr.find('{').unwrap();
    let json: serde_json::Value = serde_json::from_str(&stderr[start..]).unwrap();
    assert_eq!(json["deltas"], 3);
    assert_eq!(json["runs"], 2);
    assert_eq!(json["total_bytes"], 41);
}

#[test]
fn cli_rank_reports_invalid_range() {
    let dir = tempdir().unwrap();
    write_inputs(dir.path(), "50 40\n");

    let out = rank_cmd(dir.path()).output().unwrap();
    assert!(!out.status.success());
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("precedes start"), "{stderr}");
}

#[test]
fn cli_rank_rejects_wrong_frame_size() {
    let dir = tempdir().unwrap();
    write_inputs(dir.path(), "1 2\n");

    let out = rank_cmd(dir.path()).args(["--mode", "mcga"]).output().unwrap();
    assert!(!out.status.success());
}

#[test]
fn cli_modes_and_config_work() {
    let out = Command::new(bin()).arg("modes").output().unwrap();
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("cga-hires"));

    let out = Command::new(bin()).arg("config").output().unwrap();
    assert!(out.status.success());
}
