use serde_json::{Value, json};

/// The smallest valid tree document.
pub fn single_leaf_tree() -> Value {
    json!([["A", "a.html", null]])
}

/// A tree mixing leaves, inline children and a deferred subtree.
pub fn mixed_tree() -> Value {
    json!([
        ["Manual", "index.html", [
            ["Introduction", "index.html#sec_1", null],
            ["Release Management", "release.html", [
                ["API Numbering", "release.html#api_numbering", [
                    ["Major", "release.html#major", null],
                    ["Minor", "release.html#minor", null]
                ]],
                ["Implementation String", "release.html#implementation_string", null]
            ]],
            ["Modules", "modules.html", "modules"],
            ["Data Structures", "annotated.html", [
                ["Data Structures", "annotated.html", "annotated_dup"]
            ]]
        ]],
        ["Examples", "examples.html", "examples"]
    ])
}

/// Every link appearing in [`mixed_tree`], in document order.
pub fn mixed_tree_links() -> Vec<&'static str> {
    vec![
        "index.html",
        "index.html#sec_1",
        "release.html",
        "release.html#api_numbering",
        "release.html#major",
        "release.html#minor",
        "release.html#implementation_string",
        "modules.html",
        "annotated.html",
        "annotated.html",
        "examples.html",
    ]
}

/// A page index in generator order.
pub fn page_index() -> Value {
    json!([
        "annotated.html",
        "api_2spec_2std__types_8h.html",
        "arch_2default-linux_2odp_2api_2abi_2version_8h_source.html",
        "group__odp__atomic.html#ga048eaef4215c07cb7fd140011fd0ee36",
        "group__odp__version.html",
        "struct__odp__abi__timer__pool__t.html#ad932453ec8a61401fcbaa478a1370510",
        "unionodp__pktout__config__opt__t.html#a07d7ef9c2fbe6e39d966b8539876569e"
    ])
}
