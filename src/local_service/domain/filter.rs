//! Fleet status filters.

use super::ServiceView;
use std::fmt;

/// Narrowing applied to a fleet status snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StatusFilter {
    /// Every configured service.
    #[default]
    All,
    /// Services whose port is bound.
    Running,
    /// Services whose port is free.
    Stopped,
    /// Services whose `type` tag equals the value.
    Kind(String),
}

impl StatusFilter {
    /// Parses a filter from user input.
    ///
    /// Absent or blank input and `all` select everything; `running` and
    /// `stopped` select by status. Any other well-formed value is a `type`
    /// tag. A value that is not a well-formed tag is unrecognized and selects
    /// everything.
    #[must_use]
    pub fn parse(value: Option<&str>) -> Self {
        let Some(raw) = value.map(str::trim).filter(|raw| !raw.is_empty()) else {
            return Self::All;
        };

        match raw {
            "all" => Self::All,
            "running" => Self::Running,
            "stopped" => Self::Stopped,
            tag if is_tag(tag) => Self::Kind(tag.to_owned()),
            _ => Self::All,
        }
    }

    /// Returns whether a view passes the filter.
    #[must_use]
    pub fn matches(&self, view: &ServiceView) -> bool {
        match self {
            Self::All => true,
            Self::Running => view.status().running(),
            Self::Stopped => !view.status().running(),
            Self::Kind(tag) => view.descriptor().kind() == tag.as_str(),
        }
    }
}

/// Tags are ASCII letters, digits, `-`, `_` and `.`.
fn is_tag(value: &str) -> bool {
    value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => formatter.write_str("all"),
            Self::Running => formatter.write_str("running"),
            Self::Stopped => formatter.write_str("stopped"),
            Self::Kind(tag) => formatter.write_str(tag),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::local_service::domain::{
        RuntimeStatus, ServiceDescriptor, ServiceName, ServicePath, ServicePort, StartCommand,
    };
    use chrono::Utc;
    use rstest::rstest;

    fn descriptor(kind: &str) -> ServiceDescriptor {
        ServiceDescriptor::new(
            ServiceName::new("svc").expect("valid name"),
            ServicePort::new(3000).expect("valid port"),
            ServicePath::new("/tmp").expect("valid path"),
            StartCommand::new("true").expect("valid command"),
        )
        .with_kind(kind)
    }

    #[rstest]
    #[case(None, StatusFilter::All)]
    #[case(Some(""), StatusFilter::All)]
    #[case(Some("all"), StatusFilter::All)]
    #[case(Some("running"), StatusFilter::Running)]
    #[case(Some(" stopped "), StatusFilter::Stopped)]
    #[case(Some("frontend"), StatusFilter::Kind("frontend".to_owned()))]
    fn parse_recognizes_keywords(#[case] input: Option<&str>, #[case] expected: StatusFilter) {
        assert_eq!(StatusFilter::parse(input), expected);
    }

    #[rstest]
    #[case(Some("front end"))]
    #[case(Some("<script>"))]
    #[case(Some("type=web"))]
    fn malformed_tag_selects_everything(#[case] input: Option<&str>) {
        assert_eq!(StatusFilter::parse(input), StatusFilter::All);
    }

    #[rstest]
    #[case("backend", true)]
    #[case("frontend", false)]
    fn kind_filter_matches_by_equality(#[case] tag: &str, #[case] expected: bool) {
        let view = ServiceView::new(descriptor("backend"), RuntimeStatus::stopped(Utc::now()));

        assert_eq!(StatusFilter::Kind(tag.to_owned()).matches(&view), expected);
    }
}
