/// Capability-based permissions for one permission class (owner, group,
/// others).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Permissions {
    readable: bool,
    writable: bool,
    executable: bool,
}

impl Permissions {
    pub const fn none() -> Self {
        Self {
            readable: false,
            writable: false,
            executable: false,
        }
    }

    pub const fn read_only() -> Self {
        Self {
            readable: true,
            writable: false,
            executable: false,
        }
    }

    pub const fn read_write() -> Self {
        Self {
            readable: true,
            writable: true,
            executable: false,
        }
    }

    pub const fn read_execute() -> Self {
        Self {
            readable: true,
            writable: false,
            executable: true,
        }
    }

    pub const fn full() -> Self {
        Self {
            readable: true,
            writable: true,
            executable: true,
        }
    }

    /// Octal digit (`rwx` bits) for this class.
    pub const fn bits(&self) -> u32 {
        (self.readable as u32) << 2 | (self.writable as u32) << 1 | self.executable as u32
    }
}

/// Permissions of one filesystem entry, split by class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileMode {
    pub owner: Permissions,
    pub group: Permissions,
    pub others: Permissions,
}

impl FileMode {
    pub const fn new(owner: Permissions, group: Permissions, others: Permissions) -> Self {
        Self {
            owner,
            group,
            others,
        }
    }

    /// `rw-r--r--`
    pub const fn document() -> Self {
        Self::new(
            Permissions::read_write(),
            Permissions::read_only(),
            Permissions::read_only(),
        )
    }

    /// `rwxr-xr-x`
    pub const fn directory() -> Self {
        Self::new(
            Permissions::full(),
            Permissions::read_execute(),
            Permissions::read_execute(),
        )
    }

    /// Unix mode bits, e.g. `0o644`.
    pub const fn mode(&self) -> u32 {
        self.owner.bits() << 6 | self.group.bits() << 3 | self.others.bits()
    }
}
