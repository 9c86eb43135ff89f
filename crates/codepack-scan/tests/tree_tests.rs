use codepack_scan::{PackError, TreeConfig, TreeLister, TreeListing};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn project() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    write(root, "Program.cs", "var app = builder.Build();");
    write(root, "appsettings.json", "{}");
    write(root, "Models/User.cs", "class User {}");
    write(root, "Models/Requests/EmailRequest.cs", "class EmailRequest {}");
    write(root, "controllers/EmailController.cs", "class EmailController {}");
    write(root, "bin/Debug/app.dll", "MZ");
    write(root, "node_modules/left-pad/index.js", "module.exports = 1;");
    write(root, ".git/config", "[core]");
    write(root, ".env", "SECRET=1");

    temp
}

fn paths(listing: &TreeListing) -> Vec<(&str, usize)> {
    listing
        .entries
        .iter()
        .map(|e| (e.relative_path.as_str(), e.depth))
        .collect()
}

#[test]
fn test_directories_first_case_insensitive() {
    let temp = project();
    let listing = TreeLister::new().list(&TreeConfig::new(temp.path())).unwrap();

    assert_eq!(
        paths(&listing),
        vec![
            ("controllers", 0),
            ("controllers/EmailController.cs", 1),
            ("Models", 0),
            ("Models/Requests", 1),
            ("Models/Requests/EmailRequest.cs", 2),
            ("Models/User.cs", 1),
            ("appsettings.json", 0),
            ("Program.cs", 0),
        ]
    );
}

#[test]
fn test_summary_counts() {
    let temp = project();
    let listing = TreeLister::new().list(&TreeConfig::new(temp.path())).unwrap();

    assert_eq!(listing.total_files(), 5);
    assert_eq!(listing.total_dirs(), 3);
    let expected: u64 = [
        "var app = builder.Build();",
        "{}",
        "class User {}",
        "class EmailRequest {}",
        "class EmailController {}",
    ]
    .iter()
    .map(|s| s.len() as u64)
    .sum();
    assert_eq!(listing.total_size(), expected);

    let program = listing.entries.iter().find(|e| e.name == "Program.cs").unwrap();
    assert!(program.modified.is_some());
    assert!(!program.unreadable);
    let models = listing.entries.iter().find(|e| e.name == "Models").unwrap();
    assert_eq!(models.size, 0);
}

#[test]
fn test_max_depth_limits_levels() {
    let temp = project();
    let config = TreeConfig::new(temp.path()).with_max_depth(2);
    let listing = TreeLister::new().list(&config).unwrap();

    assert!(paths(&listing).contains(&("Models/Requests", 1)));
    assert!(!paths(&listing).contains(&("Models/Requests/EmailRequest.cs", 2)));
    assert!(listing.entries.iter().all(|e| e.depth < 2));

    let config = TreeConfig::new(temp.path()).with_max_depth(0);
    assert!(TreeLister::new().list(&config).unwrap().entries.is_empty());
}

#[test]
fn test_custom_skip_names() {
    let temp = project();
    let mut config = TreeConfig::new(temp.path());
    config.skip_names = vec!["Models".to_string()];
    let listing = TreeLister::new().list(&config).unwrap();

    assert!(!listing.entries.iter().any(|e| e.relative_path.starts_with("Models")));
    // Build output shows up once it is no longer skipped; dot-names never do
    assert!(listing.entries.iter().any(|e| e.relative_path == "bin/Debug/app.dll"));
    assert!(!listing.entries.iter().any(|e| e.name.starts_with('.')));
}

#[test]
fn test_missing_root() {
    let temp = TempDir::new().unwrap();
    let config = TreeConfig::new(temp.path().join("missing"));

    let err = TreeLister::new().list(&config).unwrap_err();
    assert!(matches!(err, PackError::RootNotFound { .. }));
}
