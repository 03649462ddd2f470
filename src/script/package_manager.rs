// src/script/package_manager.rs

//! Package manager policy table
//!
//! Maps the first token of the configured package manager command to the
//! metadata refresh and install invocations for its distro family:
//! - Debian: `apt`, `apt-get`
//! - Red Hat: `dnf`, `yum`
//! - Arch: `pacman`
//! - SUSE: `zypper`
//! - Alpine: `apk`
//!
//! Anything else is used verbatim as the install command.

/// Distro family of a recognized package manager
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagerFamily {
    Debian,
    RedHat,
    Arch,
    Suse,
    Alpine,
}

impl ManagerFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debian => "debian",
            Self::RedHat => "redhat",
            Self::Arch => "arch",
            Self::Suse => "suse",
            Self::Alpine => "alpine",
        }
    }
}

struct FamilyPolicy {
    family: ManagerFamily,
    programs: &'static [&'static str],
    update_args: &'static str,
    install_args: &'static str,
}

const POLICIES: &[FamilyPolicy] = &[
    FamilyPolicy {
        family: ManagerFamily::Debian,
        programs: &["apt", "apt-get"],
        update_args: "update",
        install_args: "install -y",
    },
    FamilyPolicy {
        family: ManagerFamily::RedHat,
        programs: &["dnf", "yum"],
        update_args: "makecache",
        install_args: "install -y",
    },
    FamilyPolicy {
        family: ManagerFamily::Arch,
        // Arch does not support partial upgrades, so refresh means -Syu
        programs: &["pacman"],
        update_args: "-Syu --noconfirm",
        install_args: "-S --noconfirm --needed",
    },
    FamilyPolicy {
        family: ManagerFamily::Suse,
        programs: &["zypper"],
        update_args: "refresh",
        install_args: "install -y",
    },
    FamilyPolicy {
        family: ManagerFamily::Alpine,
        programs: &["apk"],
        update_args: "update",
        install_args: "add",
    },
];

/// Update subcommand used for unrecognized managers
const FALLBACK_UPDATE_ARGS: &str = "update";

/// Concrete commands derived from a package manager spec
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageManagerCommands {
    /// First token of the spec, e.g. `apt`
    pub program: String,
    /// Recognized family, `None` for the verbatim fallback
    pub family: Option<ManagerFamily>,
    /// Metadata refresh command
    pub update: String,
    /// Install command; the package name is appended
    pub install: String,
}

impl PackageManagerCommands {
    /// Derive commands from a spec such as `apt` or `pacman -S`.
    ///
    /// Returns `None` for a blank spec. Whitespace is normalized so the
    /// result always fits on one script line.
    pub fn from_spec(spec: &str) -> Option<Self> {
        let tokens: Vec<&str> = spec.split_whitespace().collect();
        let program = *tokens.first()?;

        let commands = match POLICIES.iter().find(|p| p.programs.contains(&program)) {
            Some(policy) => Self {
                program: program.to_string(),
                family: Some(policy.family),
                update: format!("{} {}", program, policy.update_args),
                install: format!("{} {}", program, policy.install_args),
            },
            None => Self {
                program: program.to_string(),
                family: None,
                update: format!("{} {}", program, FALLBACK_UPDATE_ARGS),
                install: tokens.join(" "),
            },
        };
        Some(commands)
    }
}
