//! OpenGL versions, as requested on the command line and as reported by the driver.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GlVersion {
    pub major: u8,
    pub minor: u8,
}

impl GlVersion {
    /// Enough for vertex and fragment shaders.
    pub const CORE_3_3: GlVersion = GlVersion::new(3, 3);

    /// The first version with tessellation shaders and `GL_PATCHES`.
    pub const TESSELLATION: GlVersion = GlVersion::new(4, 0);

    pub const fn new(major: u8, minor: u8) -> Self {
        Self { major, minor }
    }

    /// Reads the version out of a `GL_VERSION` string.
    ///
    /// Desktop drivers report `<major>.<minor>[.<release>] [vendor info]`; ES drivers prefix that
    /// with `OpenGL ES `.
    pub fn from_gl_string(s: &str) -> Option<Self> {
        let s = s.trim();
        let s = s.strip_prefix("OpenGL ES ").unwrap_or(s);
        let number = s.split_whitespace().next()?;

        let mut parts = number.split('.');
        let major = parts.next()?.parse().ok()?;
        let minor = parts.next()?.parse().ok()?;

        Some(Self::new(major, minor))
    }
}

impl fmt::Display for GlVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for GlVersion {
    type Err = String;

    /// Parses exactly `<major>.<minor>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || format!("\"{}\" is not a <major>.<minor> version", s);

        let mut parts = s.trim().splitn(2, '.');
        let major = parts.next().and_then(|p| p.parse().ok()).ok_or_else(invalid)?;
        let minor = parts.next().and_then(|p| p.parse().ok()).ok_or_else(invalid)?;

        Ok(Self::new(major, minor))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn driver_version_strings_parse() {
        assert_eq!(GlVersion::from_gl_string("4.6.0 NVIDIA 535.54.03"), Some(GlVersion::new(4, 6)));
        assert_eq!(GlVersion::from_gl_string("3.3 (Core Profile) Mesa 23.0.4"), Some(GlVersion::new(3, 3)));
        assert_eq!(GlVersion::from_gl_string("OpenGL ES 3.2 Mesa 23.0.4"), Some(GlVersion::new(3, 2)));
        assert_eq!(GlVersion::from_gl_string("4.1 ATI-4.14.1"), Some(GlVersion::new(4, 1)));
        assert_eq!(GlVersion::from_gl_string("garbage"), None);
        assert_eq!(GlVersion::from_gl_string(""), None);
    }

    #[test]
    fn versions_compare_major_first() {
        assert!(GlVersion::new(4, 0) > GlVersion::new(3, 3));
        assert!(GlVersion::new(3, 3) < GlVersion::TESSELLATION);
        assert!(GlVersion::new(4, 6) >= GlVersion::TESSELLATION);
    }

    #[test]
    fn requested_versions_parse_strictly() {
        assert_eq!("3.3".parse(), Ok(GlVersion::CORE_3_3));
        assert_eq!(" 4.5 ".parse(), Ok(GlVersion::new(4, 5)));
        assert!("4".parse::<GlVersion>().is_err());
        assert!("4.x".parse::<GlVersion>().is_err());
        assert!("4.5.1".parse::<GlVersion>().is_err());
    }

    #[test]
    fn version_displays_as_major_dot_minor() {
        assert_eq!(GlVersion::TESSELLATION.to_string(), "4.0");
    }
}
