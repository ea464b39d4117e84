//! # Survey Target Model
//!
//! A target is whatever the user wrote on one line of the target file: a hostname
//! or an IP address. Nothing is validated beyond trimming and dropping blank
//! lines, resolution problems surface later as failed probes.

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::net::IpAddr;
use std::path::Path;

use tracing::{debug, error};

/// A single host identifier to be probed.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Target(String);

impl Target {
    /// Trims the input, returns `None` when nothing is left.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Exact textual match against an address, the same comparison used to skip self-pings.
    pub fn is_address(&self, ip: &IpAddr) -> bool {
        self.0 == ip.to_string()
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered list of targets, kept in file order for the whole run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TargetList {
    targets: Vec<Target>,
}

impl TargetList {
    /// Reads the target file at `path`.
    ///
    /// A missing or unreadable file is reported and yields an empty list; the
    /// caller decides what an empty list means.
    pub fn load(path: &Path) -> Self {
        let parsed = File::open(path).and_then(|file| Self::parse(BufReader::new(file)));

        match parsed {
            Ok(list) => {
                debug!(path = %path.display(), count = list.len(), "Target list loaded");
                list
            }
            Err(e) => {
                error!("Error while reading the file {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// One target per line, blank lines skipped, no comment syntax.
    pub fn parse<R: BufRead>(reader: R) -> io::Result<Self> {
        let mut targets = Vec::new();
        for line in reader.lines() {
            if let Some(target) = Target::new(&line?) {
                targets.push(target);
            }
        }
        Ok(Self { targets })
    }

    /// Drops every entry equal to the textual form of `ip`.
    pub fn without(self, ip: &IpAddr) -> Self {
        self.targets
            .into_iter()
            .filter(|target| !target.is_address(ip))
            .collect()
    }

    /// Removes the first occurrence of `target`, returns whether anything was removed.
    pub fn remove_first(&mut self, target: &Target) -> bool {
        match self.targets.iter().position(|t| t == target) {
            Some(idx) => {
                self.targets.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Target> {
        self.targets.iter()
    }
}

impl FromIterator<Target> for TargetList {
    fn from_iter<I: IntoIterator<Item = Target>>(iter: I) -> Self {
        Self {
            targets: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a TargetList {
    type Item = &'a Target;
    type IntoIter = std::slice::Iter<'a, Target>;

    fn into_iter(self) -> Self::IntoIter {
        self.targets.iter()
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
