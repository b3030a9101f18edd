use clap::{Subcommand, Args};
use veevent_api::client::ApiClient;
use veevent_api::client::invitations::{self as invitations_client, QueryInvitations};
use veevent_api::client::iterate::Iterate;
use veevent_api::client::links::UpdateResource;
use veevent_api::invitations::{Invitation, UpdateInvitation};
use veevent_lib::ids;

use crate::error::{self, Context};
use crate::state::AppState;
use crate::util;

#[derive(Debug, Args)]
pub struct InvitationsArgs {
    #[command(subcommand)]
    command: InvitationsCmds
}

#[derive(Debug, Subcommand)]
enum InvitationsCmds {
    /// lists invitations
    List(ListArgs),

    /// accepts an invitation
    Accept(AnswerArgs),

    /// rejects an invitation
    Reject(AnswerArgs),
}

impl InvitationsCmds {
    fn path(&self) -> String {
        match self {
            InvitationsCmds::Accept(given) | InvitationsCmds::Reject(given) => {
                format!("/invitations/{}", given.id)
            },
            InvitationsCmds::List(_) => String::from("/invitations"),
        }
    }
}

pub fn handle(state: &mut AppState, args: InvitationsArgs) -> error::Result {
    if !super::navigate(state, &args.command.path())? {
        return Ok(());
    }

    let client = &state.client;

    match args.command {
        InvitationsCmds::List(given) => list(client, given),
        InvitationsCmds::Accept(given) => answer(client, given, UpdateInvitation::accept()),
        InvitationsCmds::Reject(given) => answer(client, given, UpdateInvitation::reject()),
    }
}

fn query(event: Option<ids::EventId>) -> QueryInvitations {
    match event {
        Some(id) => QueryInvitations::event(id),
        None => QueryInvitations::new(),
    }
}

fn print_invitation(invitation: &Invitation) {
    let participant = invitation.participant.as_ref()
        .map(|user| user.display_name())
        .unwrap_or_else(|| String::from("-"));

    println!(
        "{} [{}] {} {}",
        invitation.id,
        util::or_dash(&invitation.status),
        participant,
        util::or_dash(&invitation.description)
    );
}

#[derive(Debug, Args)]
struct ListArgs {
    /// only invitations for this event
    #[arg(long)]
    event: Option<ids::EventId>,

    /// retrieves the participant of every invitation
    #[arg(long)]
    enrich: bool,

    #[command(flatten)]
    page: util::PageArgs,
}

fn list(client: &ApiClient, args: ListArgs) -> error::Result {
    let (mut invitations, page) = util::fetch(client, query(args.event), &args.page)?;

    if args.enrich {
        invitations = invitations_client::enrich(client, invitations);
    }

    for invitation in &invitations {
        print_invitation(invitation);
    }

    util::print_page(page.as_ref());

    Ok(())
}

#[derive(Debug, Args)]
struct AnswerArgs {
    /// id of the invitation
    id: ids::InvitationId,

    /// event the invitation belongs to, narrows the search
    #[arg(long)]
    event: Option<ids::EventId>,
}

/// there is no endpoint for a single invitation so it is looked up in the
/// collection
fn find(client: &ApiClient, args: &AnswerArgs) -> error::Result<Invitation> {
    let mut query = query(args.event);

    for result in Iterate::new(client, &mut query) {
        let invitation = result.context("failed to retrieve invitations")?;

        if invitation.id == args.id {
            return Ok(invitation);
        }
    }

    Err(error::Error::from(format!("invitation {} was not found", args.id)))
}

fn answer(client: &ApiClient, args: AnswerArgs, body: UpdateInvitation) -> error::Result {
    let invitation = find(client, &args)?;

    let updated: Invitation = UpdateResource::from_links(&invitation.links, body)?
        .send(client)
        .context("failed to answer invitation")?;

    print_invitation(&updated);

    Ok(())
}
