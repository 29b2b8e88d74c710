//! The built-in IDE image table.

/// Identifiers of the built-in IDE images.
pub mod ids {
    /// Browser-based code editor.
    pub const CODE: &str = "code";
    pub const CODE_HELPER: &str = "code-helper";
    /// Web extension bundled into the browser editor.
    pub const CODE_WEB_EXTENSION: &str = "code-web-extension";
    pub const CODE_DESKTOP: &str = "code-desktop";
    pub const CODE_DESKTOP_INSIDERS: &str = "code-desktop-insiders";
    /// Web terminal.
    pub const XTERM: &str = "xterm";
    pub const INTELLIJ: &str = "intellij";
    pub const GOLAND: &str = "goland";
    pub const PYCHARM: &str = "pycharm";
    pub const PHPSTORM: &str = "phpstorm";
    pub const RUBYMINE: &str = "rubymine";
    pub const WEBSTORM: &str = "webstorm";
    pub const RIDER: &str = "rider";
    pub const CLION: &str = "clion";
    pub const JB_BACKEND_PLUGIN: &str = "jb-backend-plugin";
    pub const JB_LAUNCHER: &str = "jb-launcher";
}

/// `(identifier, image repository, pinned version)`.
///
/// Pinned versions are bumped by hand; every other image follows the
/// deployment's default tag.
pub(crate) const BUILTIN_ENTRIES: &[(&str, &str, Option<&str>)] = &[
    (
        ids::CODE,
        "ide/code",
        Some("commit-98471ed07f0fb36bce9dc78a2aea15aaeb058cdd"),
    ),
    (ids::CODE_HELPER, "ide/code-codehelper", None),
    (
        ids::CODE_WEB_EXTENSION,
        "ide/gitpod-code-web",
        Some("commit-11506211281adf4b61b4f0111e87963b202f5d80"),
    ),
    (ids::CODE_DESKTOP, "ide/code-desktop", None),
    (ids::CODE_DESKTOP_INSIDERS, "ide/code-desktop-insiders", None),
    (ids::XTERM, "ide/xterm-web", None),
    (ids::INTELLIJ, "ide/intellij", None),
    (ids::GOLAND, "ide/goland", None),
    (ids::PYCHARM, "ide/pycharm", None),
    (ids::PHPSTORM, "ide/phpstorm", None),
    (ids::RUBYMINE, "ide/rubymine", None),
    (ids::WEBSTORM, "ide/webstorm", None),
    (ids::RIDER, "ide/rider", None),
    (ids::CLION, "ide/clion", None),
    (ids::JB_BACKEND_PLUGIN, "ide/jb-backend-plugin", None),
    (ids::JB_LAUNCHER, "ide/jb-launcher", None),
];
