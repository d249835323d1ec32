use crate::{
    repository::{Peer, PeerKey},
    sync::{ResolutionError, ResolvePeer},
};

/// Resolves `<kind>:<id>` descriptors locally, e.g. `user:123`.
#[derive(Debug, Default, Clone, Copy)]
pub struct NumericResolver;

impl ResolvePeer for NumericResolver {
    async fn resolve(&mut self, descriptor: &str) -> Result<Peer, ResolutionError> {
        descriptor
            .trim()
            .parse::<PeerKey>()
            .map(Peer::from)
            .map_err(|e| ResolutionError::new(descriptor, e))
    }
}

#[cfg(test)]
mod tests {
    use assertables::*;
    use rstest::*;

    use super::*;
    use crate::repository::PeerKind;

    #[rstest]
    #[tokio::test]
    async fn test_resolves_numeric_descriptor() {
        let peer = assert_ok!(NumericResolver.resolve(" channel:42 ").await);

        assert_eq!(Peer::new(PeerKey::new(PeerKind::Channel, 42)), peer);
    }

    #[rstest]
    #[case("@someone")]
    #[case("https://t.me/+abcdef")]
    #[case("user:")]
    #[tokio::test]
    async fn test_rejects_everything_else(#[case] descriptor: &str) {
        let error = assert_err!(NumericResolver.resolve(descriptor).await);

        assert_eq!(descriptor, error.descriptor());
    }
}
