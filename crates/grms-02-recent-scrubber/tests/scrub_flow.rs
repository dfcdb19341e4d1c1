//! # Scrub Flow Integration Tests
//!
//! Drives the blacklist file and the XBEL record file together the way the
//! `grms` binary does:
//!
//! 1. `--add` converts a path, updates the blacklist, saves it
//! 2. A fresh process loads the saved blacklist
//! 3. The scrubber removes matching bookmarks from `recently-used.xbel`
//! 4. Resident mode rescrubs when the record file changes

use std::fs;
use std::path::Path;
use std::time::Duration;

use grms_01_prefix_blacklist::{BlacklistStore, FileBlacklistStore, PrefixHashSet};
use grms_02_recent_scrubber::domain::path_to_file_url;
use grms_02_recent_scrubber::{
    apply_edits, watch_file, RecentScrubber, RecentStore, ScrubReport, XbelRecentStore,
};
use tempfile::TempDir;
use tokio::sync::watch;
use tokio::time::{sleep, timeout};

fn file_url(path: &Path) -> String {
    path_to_file_url(path).expect("temp paths are absolute")
}

fn xbel_with(uris: &[String]) -> String {
    let mut doc = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <xbel version=\"1.0\"\n      \
         xmlns:bookmark=\"http://www.freedesktop.org/standards/desktop-bookmarks\"\n      \
         xmlns:mime=\"http://www.freedesktop.org/standards/shared-mime-info\"\n>\n",
    );
    for uri in uris {
        doc.push_str(&format!(
            "  <bookmark href=\"{uri}\" added=\"2024-01-01T00:00:00Z\">\n    <info/>\n  </bookmark>\n"
        ));
    }
    doc.push_str("</xbel>\n");
    doc
}

fn load_blacklist(path: &Path) -> PrefixHashSet {
    let mut blacklist = PrefixHashSet::new();
    blacklist.load(&FileBlacklistStore::new(path)).unwrap();
    blacklist
}

#[test]
fn test_added_folder_is_scrubbed_after_reload() {
    let temp_dir = TempDir::new().unwrap();
    let private = temp_dir.path().join("private");
    fs::create_dir(&private).unwrap();
    let blacklist_path = temp_dir.path().join("grms.conf");

    // Edit mode
    let mut blacklist = load_blacklist(&blacklist_path);
    let summary = apply_edits(&mut blacklist, [private.to_str().unwrap()], Vec::<String>::new());
    assert_eq!(summary.added, 1);
    blacklist.save(&FileBlacklistStore::new(&blacklist_path)).unwrap();

    let saved = fs::read_to_string(&blacklist_path).unwrap();
    assert!(
        !saved.contains("private"),
        "The blacklist file must not contain plaintext prefixes"
    );

    // Resident mode, fresh process
    let kept = file_url(&temp_dir.path().join("public.txt"));
    let hidden = file_url(&private.join("secret.txt"));
    let recent_path = temp_dir.path().join("recently-used.xbel");
    fs::write(&recent_path, xbel_with(&[hidden.clone(), kept.clone()])).unwrap();

    let mut scrubber = RecentScrubber::new(
        load_blacklist(&blacklist_path),
        XbelRecentStore::new(&recent_path),
    );
    let report = scrubber.start().unwrap();

    assert_eq!(
        report,
        ScrubReport {
            scanned: 2,
            matched: 1,
            removed: 1,
            failed: 0
        }
    );
    let uris: Vec<String> = scrubber
        .store()
        .items()
        .unwrap()
        .into_iter()
        .map(|item| item.uri)
        .collect();
    assert_eq!(uris, vec![kept]);
    assert!(!fs::read_to_string(&recent_path).unwrap().contains(&hidden));
}

#[test]
fn test_removed_prefix_stops_matching() {
    let temp_dir = TempDir::new().unwrap();
    let blacklist_path = temp_dir.path().join("grms.conf");
    let store = FileBlacklistStore::new(&blacklist_path);

    let mut blacklist = PrefixHashSet::new();
    apply_edits(
        &mut blacklist,
        ["https://example.com/", "https://example.org/"],
        Vec::<String>::new(),
    );
    blacklist.save(&store).unwrap();

    let mut blacklist = load_blacklist(&blacklist_path);
    let summary = apply_edits(
        &mut blacklist,
        Vec::<String>::new(),
        ["https://example.com/page"],
    );
    assert_eq!(summary.removed, 1);
    blacklist.save(&store).unwrap();

    let reloaded = load_blacklist(&blacklist_path);
    assert_eq!(reloaded.len(), 1);
    assert!(!reloaded.contains("https://example.com/page"));
    assert!(reloaded.contains("https://example.org/page"));
}

#[test]
fn test_corrupt_blacklist_is_not_overwritten() {
    let temp_dir = TempDir::new().unwrap();
    let blacklist_path = temp_dir.path().join("grms.conf");
    fs::write(&blacklist_path, "not a digest line at all\n").unwrap();
    let store = FileBlacklistStore::new(&blacklist_path);

    let mut blacklist = PrefixHashSet::new();
    let err = blacklist.load(&store).unwrap_err();

    assert!(err.is_format());
    assert!(blacklist.is_empty());
    assert_eq!(
        store.read().unwrap().as_deref(),
        Some(&b"not a digest line at all\n"[..])
    );
}

#[tokio::test]
async fn test_resident_scrubber_reacts_to_new_bookmarks() {
    let temp_dir = TempDir::new().unwrap();
    let private = temp_dir.path().join("private");
    fs::create_dir(&private).unwrap();

    let mut blacklist = PrefixHashSet::new();
    blacklist.add(&file_url(&private));

    let kept = file_url(&temp_dir.path().join("public.txt"));
    let recent_path = temp_dir.path().join("recently-used.xbel");
    fs::write(&recent_path, xbel_with(&[kept.clone()])).unwrap();

    let mut scrubber = RecentScrubber::new(blacklist, XbelRecentStore::new(&recent_path));
    scrubber.start().unwrap();

    let mut changes = watch_file(recent_path.clone(), Duration::from_millis(10));
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let writer_path = recent_path.clone();
    let hidden = file_url(&private.join("new.txt"));
    let expected_kept = kept.clone();
    let writer = tokio::spawn(async move {
        sleep(Duration::from_millis(50)).await;
        fs::write(&writer_path, xbel_with(&[hidden.clone(), expected_kept])).unwrap();

        let mut scrubbed = false;
        for _ in 0..200 {
            sleep(Duration::from_millis(10)).await;
            if !fs::read_to_string(&writer_path).unwrap().contains(&hidden) {
                scrubbed = true;
                break;
            }
        }
        shutdown_tx.send(true).unwrap();
        scrubbed
    });

    timeout(Duration::from_secs(5), scrubber.run(&mut changes, shutdown_rx))
        .await
        .expect("Run loop should stop on shutdown")
        .unwrap();

    assert!(writer.await.unwrap(), "New blacklisted bookmark was not scrubbed");
    assert!(fs::read_to_string(&recent_path).unwrap().contains(&kept));
}
