use reqwest::Method;
use veevent_lib::ids;

use crate::client::error::RequestError;
use crate::client::{ApiClient, read_item, query_collection};
use crate::client::iterate::Pageable;
use crate::invitations::Invitation;
use crate::users::User;
use crate::{Payload, PageQuery};

/// link relation pointing at the invited user
pub const PARTICIPANT_REL: &str = "participant";

pub struct QueryInvitations {
    event: Option<ids::EventId>,
    query: PageQuery,
}

impl QueryInvitations {
    pub fn new() -> Self {
        QueryInvitations {
            event: None,
            query: PageQuery::new(),
        }
    }

    /// only invitations for the given event
    pub fn event(id: ids::EventId) -> Self {
        QueryInvitations {
            event: Some(id),
            query: PageQuery::new(),
        }
    }

    pub fn send(&self, client: &ApiClient) -> Result<Payload<Vec<Invitation>>, RequestError> {
        match self.event {
            Some(id) => query_collection(client, &format!("/events/{}/invitations", id), &self.query),
            None => query_collection(client, "/invitations", &self.query),
        }
    }
}

impl Pageable for QueryInvitations {
    type Item = Invitation;

    fn query_mut(&mut self) -> &mut PageQuery {
        &mut self.query
    }

    fn send(&self, client: &ApiClient) -> Result<Payload<Vec<Invitation>>, RequestError> {
        QueryInvitations::send(self, client)
    }
}

/// retrieves the participant of an invitation through its link
pub struct RetrieveParticipant {
    href: String
}

impl RetrieveParticipant {
    pub fn of(invitation: &Invitation) -> Option<Self> {
        invitation.links.get(PARTICIPANT_REL).map(|link| RetrieveParticipant {
            href: link.resolved_href().to_owned()
        })
    }

    pub fn send(self, client: &ApiClient) -> Result<User, RequestError> {
        let res = client.follow(Method::GET, &self.href)?.send()?;

        read_item(res)
    }
}

/// fetches the participant of every invitation concurrently. an invitation
/// whose fetch fails is returned without a participant
pub fn enrich(client: &ApiClient, invitations: Vec<Invitation>) -> Vec<Invitation> {
    enrich_with(invitations, |invitation| {
        match RetrieveParticipant::of(invitation) {
            Some(retrieve) => retrieve.send(client).map(Some),
            None => Ok(None),
        }
    })
}

pub fn enrich_with<F, E>(mut invitations: Vec<Invitation>, fetch: F) -> Vec<Invitation>
where
    F: Fn(&Invitation) -> Result<Option<User>, E> + Sync,
    E: std::fmt::Display + Send,
{
    let participants: Vec<Option<User>> = std::thread::scope(|scope| {
        let fetch = &fetch;
        let handles: Vec<_> = invitations.iter()
            .map(|invitation| scope.spawn(move || fetch(invitation)))
            .collect();

        handles.into_iter()
            .zip(invitations.iter())
            .map(|(handle, invitation)| match handle.join() {
                Ok(Ok(found)) => found,
                Ok(Err(err)) => {
                    tracing::warn!("failed to retrieve participant of invitation {}: {}", invitation.id, err);
                    None
                },
                Err(_) => {
                    tracing::warn!("participant retrieval panicked for invitation {}", invitation.id);
                    None
                }
            })
            .collect()
    });

    for (invitation, participant) in invitations.iter_mut().zip(participants) {
        if participant.is_some() {
            invitation.participant = participant;
        }
    }

    invitations
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    fn invitation(id: i64) -> Invitation {
        serde_json::from_value(json!({
            "id": id,
            "status": "SENT",
            "_links": {
                "participant": {"href": format!("http://localhost:8090/api/v1/users/{}", id * 10)}
            }
        })).unwrap()
    }

    fn user(id: i64) -> User {
        serde_json::from_value(json!({"id": id, "role": "user", "pseudo": format!("p{}", id)})).unwrap()
    }

    #[test]
    fn failed_fetch_keeps_invitation() {
        let invitations = vec![invitation(1), invitation(2), invitation(3)];

        let enriched = enrich_with(invitations.clone(), |inv| {
            if inv.id == 2 {
                Err(String::from("connection reset"))
            } else {
                Ok(Some(user(inv.id * 10)))
            }
        });

        assert_eq!(enriched.len(), 3);
        assert_eq!(enriched[0].participant.as_ref().map(|u| u.id), Some(10));
        assert_eq!(enriched[1], invitations[1]);
        assert!(enriched[1].participant.is_none());
        assert_eq!(enriched[2].participant.as_ref().map(|u| u.id), Some(30));
    }

    #[test]
    fn order_is_preserved() {
        let invitations: Vec<Invitation> = (1..=8).map(invitation).collect();

        let enriched = enrich_with(invitations, |inv| {
            std::thread::sleep(std::time::Duration::from_millis((8 - inv.id as u64) * 2));
            Ok::<_, String>(Some(user(inv.id)))
        });

        let ids: Vec<i64> = enriched.iter().map(|i| i.id).collect();
        let participants: Vec<i64> = enriched.iter()
            .filter_map(|i| i.participant.as_ref().map(|u| u.id))
            .collect();

        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(participants, ids);
    }

    #[test]
    fn missing_participant_link() {
        let bare: Invitation = serde_json::from_value(json!({"id": 4})).unwrap();

        assert!(RetrieveParticipant::of(&bare).is_none());
        assert!(RetrieveParticipant::of(&invitation(4)).is_some());
    }
}
