use crate::areas::database::Database;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;

/// Linear history starting at a given commit
///
/// Yields `(oid, commit)` pairs from newest to oldest and stops after the
/// commit without a parent. A commit that cannot be loaded is yielded as an
/// error and ends the walk.
#[derive(Clone, new)]
pub struct History<'d> {
    database: &'d Database,
    start: Option<ObjectId>,
}

impl<'d> IntoIterator for History<'d> {
    type Item = crate::errors::Result<(ObjectId, Commit)>;
    type IntoIter = HistoryIter<'d>;

    fn into_iter(self) -> Self::IntoIter {
        HistoryIter {
            database: self.database,
            current_commit_oid: self.start,
        }
    }
}

#[derive(Clone)]
pub struct HistoryIter<'d> {
    database: &'d Database,
    current_commit_oid: Option<ObjectId>,
}

impl Iterator for HistoryIter<'_> {
    type Item = crate::errors::Result<(ObjectId, Commit)>;

    fn next(&mut self) -> Option<Self::Item> {
        let commit_oid = self.current_commit_oid.take()?;

        match self.database.parse_object_as_commit(&commit_oid) {
            Ok(commit) => {
                // Move to the parent commit for the next iteration
                self.current_commit_oid = commit.parent().cloned();
                Some(Ok((commit_oid, commit)))
            }
            Err(e) => Some(Err(e)),
        }
    }
}
