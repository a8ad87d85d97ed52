pub mod fixtures;

use navtree::{Navigator, NavigatorError, TreeNode};
use std::path::PathBuf;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Directory holding the generated HTML fixture set.
pub fn html_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/html")
}

/// Opens the fixture `navtreedata.js` with default settings.
pub fn open_fixture() -> Result<Navigator, NavigatorError> {
    Navigator::builder()
        .with_data_file(html_dir().join("navtreedata.js"))?
        .build()
}

/// Titles along a chain of nodes.
pub fn titles<'a, I>(chain: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a TreeNode>,
{
    chain.into_iter().map(|n| n.title.clone()).collect()
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
