use log::trace;

use crate::{
    catalog::{Catalog, CatalogError},
    repository::{FolderId, Mutation, Peer, RemoteFolder},
};

/// Outcome of a membership change against a folder snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Merge {
    /// The folder already is in the requested state; nothing to write.
    NoOp,
    Update(Mutation),
}

/// Adds `peer` to the managed folder `folder_id`.
///
/// `current` is the folder as freshly fetched, `None` if the account does not
/// have it yet. The resulting member list is the current one with `peer`
/// appended; existing members are never dropped or reordered.
pub fn merge_peer(
    catalog: &Catalog,
    folder_id: FolderId,
    peer: Peer,
    current: Option<&RemoteFolder>,
) -> Result<Merge, CatalogError> {
    let spec = catalog.require(folder_id)?;

    let Some(folder) = current else {
        trace!("folder {folder_id} missing, creating it with {peer}");
        return Ok(Merge::Update(Mutation::AddPeer {
            folder_id,
            title: spec.title().clone(),
            peers: vec![peer.clone()],
            peer,
        }));
    };

    if folder.contains(peer.key()) {
        trace!("{peer} already in folder {folder_id}");
        return Ok(Merge::NoOp);
    }

    let mut peers = Vec::with_capacity(folder.peers().len() + 1);
    peers.extend(folder.peers().iter().cloned());
    peers.push(peer.clone());

    Ok(Merge::Update(Mutation::AddPeer {
        folder_id,
        title: folder.title().clone(),
        peer,
        peers,
    }))
}

/// Removes `peer` from the managed folder `folder_id`, keeping every other
/// member in place.
pub fn unmerge_peer(
    catalog: &Catalog,
    folder_id: FolderId,
    peer: &Peer,
    current: Option<&RemoteFolder>,
) -> Result<Merge, CatalogError> {
    catalog.require(folder_id)?;

    let Some(folder) = current.filter(|folder| folder.contains(peer.key())) else {
        trace!("{peer} not in folder {folder_id}");
        return Ok(Merge::NoOp);
    };

    let peers = folder
        .peers()
        .iter()
        .filter(|member| !member.is(peer))
        .cloned()
        .collect();

    Ok(Merge::Update(Mutation::RemovePeer {
        folder_id,
        title: folder.title().clone(),
        peer: peer.clone(),
        peers,
    }))
}

/// Moves `peer` into `folder_id` and out of every other managed folder.
///
/// All decisions are taken against the same snapshot. Removals come first in
/// ascending folder order, the addition last. Folders outside the catalog keep
/// the peer.
pub fn move_peer(
    catalog: &Catalog,
    folder_id: FolderId,
    peer: &Peer,
    remote: &[RemoteFolder],
) -> Result<Vec<Mutation>, CatalogError> {
    catalog.require(folder_id)?;
    let find = |id: FolderId| remote.iter().find(|folder| folder.id() == id);

    let mut mutations = Vec::new();
    for spec in catalog.specs().iter().filter(|spec| spec.id() != folder_id) {
        if let Merge::Update(mutation) = unmerge_peer(catalog, spec.id(), peer, find(spec.id()))? {
            mutations.push(mutation);
        }
    }
    if let Merge::Update(mutation) = merge_peer(catalog, folder_id, peer.clone(), find(folder_id))? {
        mutations.push(mutation);
    }

    Ok(mutations)
}

#[cfg(test)]
mod tests {
    use assertables::*;
    use rstest::*;

    use super::*;
    use crate::repository::{FolderSpec, PeerKey, PeerKind};

    fn id(n: u32) -> FolderId {
        assert_ok!(FolderId::try_from(n))
    }

    fn user(n: i64) -> Peer {
        Peer::new(PeerKey::new(PeerKind::User, n))
    }

    #[fixture]
    fn catalog() -> Catalog {
        assert_ok!(Catalog::new([
            FolderSpec::new(id(1), "Manual"),
            FolderSpec::new(id(2), "Bot"),
            FolderSpec::new(id(3), "Timewaster"),
        ]))
    }

    #[fixture]
    fn x() -> Peer {
        Peer::with_label(PeerKey::new(PeerKind::User, 100), "X")
    }

    #[fixture]
    fn y() -> Peer {
        Peer::new(PeerKey::new(PeerKind::Channel, 200))
    }

    #[rstest]
    fn test_new_peer_is_appended_to_existing_members(catalog: Catalog, x: Peer, y: Peer) {
        let folder = RemoteFolder::new(id(1), "Manual", vec![x.clone()]);

        let merge = assert_ok!(merge_peer(&catalog, id(1), y.clone(), Some(&folder)));

        assert_eq!(
            Merge::Update(Mutation::AddPeer {
                folder_id: id(1),
                title: "Manual".to_string(),
                peer: y.clone(),
                peers: vec![x, y],
            }),
            merge
        );
    }

    #[rstest]
    fn test_merge_is_strict_superset(catalog: Catalog, y: Peer) {
        let members: Vec<Peer> = (1..=20).map(user).collect();
        let folder = RemoteFolder::new(id(2), "Bot", members.clone());

        let Merge::Update(mutation) = assert_ok!(merge_peer(&catalog, id(2), y.clone(), Some(&folder)))
        else {
            panic!("adding a new peer should produce a write");
        };

        let submitted = mutation.update().peers;
        assert_eq!(members.len() + 1, submitted.len());
        assert_eq!(members.as_slice(), &submitted[..members.len()]);
        assert_eq!(Some(&y), submitted.last());
    }

    #[rstest]
    fn test_present_peer_is_noop(catalog: Catalog, x: Peer) {
        let folder = RemoteFolder::new(id(1), "Manual", vec![x.clone(), user(1)]);

        let merge = assert_ok!(merge_peer(&catalog, id(1), x, Some(&folder)));

        assert_eq!(Merge::NoOp, merge);
    }

    #[rstest]
    fn test_presence_is_decided_by_key_not_label(catalog: Catalog, x: Peer) {
        let folder = RemoteFolder::new(id(1), "Manual", vec![x.clone()]);
        let renamed = Peer::with_label(x.key(), "Someone else");

        assert_eq!(
            Merge::NoOp,
            assert_ok!(merge_peer(&catalog, id(1), renamed, Some(&folder)))
        );
    }

    #[rstest]
    fn test_add_keeps_observed_title(catalog: Catalog, y: Peer) {
        let folder = RemoteFolder::new(id(2), "Bots", vec![]);

        let Merge::Update(mutation) = assert_ok!(merge_peer(&catalog, id(2), y, Some(&folder))) else {
            panic!("adding a new peer should produce a write");
        };

        assert_eq!("Bots", mutation.update().title);
    }

    #[rstest]
    fn test_missing_folder_is_created_with_peer(catalog: Catalog, y: Peer) {
        let merge = assert_ok!(merge_peer(&catalog, id(3), y.clone(), None));

        assert_eq!(
            Merge::Update(Mutation::AddPeer {
                folder_id: id(3),
                title: "Timewaster".to_string(),
                peer: y.clone(),
                peers: vec![y],
            }),
            merge
        );
    }

    #[rstest]
    fn test_unmanaged_target_is_rejected(catalog: Catalog, y: Peer) {
        let folder = RemoteFolder::new(id(9), "Work", vec![]);

        let error = assert_err!(merge_peer(&catalog, id(9), y, Some(&folder)));
        assert_eq!(CatalogError::UnknownFolder(id(9)), error);
    }

    #[rstest]
    fn test_remove_keeps_order_of_remaining_members(catalog: Catalog, x: Peer) {
        let folder = RemoteFolder::new(id(2), "Bot", vec![user(1), x.clone(), user(2)]);

        let merge = assert_ok!(unmerge_peer(&catalog, id(2), &x, Some(&folder)));

        assert_eq!(
            Merge::Update(Mutation::RemovePeer {
                folder_id: id(2),
                title: "Bot".to_string(),
                peer: x,
                peers: vec![user(1), user(2)],
            }),
            merge
        );
    }

    #[rstest]
    #[case(None)]
    #[case(Some(RemoteFolder::new(id(2), "Bot", vec![user(1)])))]
    fn test_remove_of_absent_peer_is_noop(
        catalog: Catalog,
        x: Peer,
        #[case] folder: Option<RemoteFolder>,
    ) {
        assert_eq!(
            Merge::NoOp,
            assert_ok!(unmerge_peer(&catalog, id(2), &x, folder.as_ref()))
        );
    }

    #[rstest]
    fn test_move_leaves_other_managed_folders_and_joins_target(catalog: Catalog, x: Peer) {
        let remote = vec![
            RemoteFolder::new(id(1), "Manual", vec![x.clone(), user(1)]),
            RemoteFolder::new(id(2), "Bot", vec![user(2)]),
            RemoteFolder::new(id(3), "Timewaster", vec![x.clone()]),
            RemoteFolder::new(id(8), "Friends", vec![x.clone()]),
        ];

        let mutations = assert_ok!(move_peer(&catalog, id(2), &x, &remote));

        assert_eq!(
            vec![
                Mutation::RemovePeer {
                    folder_id: id(1),
                    title: "Manual".to_string(),
                    peer: x.clone(),
                    peers: vec![user(1)],
                },
                Mutation::RemovePeer {
                    folder_id: id(3),
                    title: "Timewaster".to_string(),
                    peer: x.clone(),
                    peers: vec![],
                },
                Mutation::AddPeer {
                    folder_id: id(2),
                    title: "Bot".to_string(),
                    peer: x.clone(),
                    peers: vec![user(2), x],
                },
            ],
            mutations
        );
    }

    #[rstest]
    fn test_move_into_current_folder_only_is_empty(catalog: Catalog, x: Peer) {
        let remote = vec![
            RemoteFolder::new(id(1), "Manual", vec![x.clone()]),
            RemoteFolder::new(id(2), "Bot", vec![]),
        ];

        assert_is_empty!(assert_ok!(move_peer(&catalog, id(1), &x, &remote)));
    }
}
