//! Pet command handlers.

use adoptly_api::{AdoptionStatus, Pet, PetClient, PetId};
use adoptly_core::{PetDetailController, PetListController};
use tabled::Tabled;
use tracing::{debug, info};

use crate::cli::{GlobalOpts, OutputFormat, PetsArgs, PetsCommand};
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct PetRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl PetRow {
    fn from_pet(pet: &Pet, color: bool) -> Self {
        Self {
            id: pet.id,
            name: pet.name.clone(),
            kind: pet.kind.clone(),
            status: output::adoption_label(pet.is_adopted(), color),
        }
    }
}

fn detail(pet: &Pet, color: bool) -> String {
    let mut lines = vec![
        format!("ID:     {}", pet.id),
        format!("Name:   {}", pet.name),
        format!("Type:   {}", pet.kind),
        format!("Status: {}", output::adoption_label(pet.is_adopted(), color)),
    ];
    if !pet.image.is_empty() {
        lines.push(format!("Image:  {}", pet.image));
    }
    lines.join("\n")
}

// ── Local pets ──────────────────────────────────────────────────────

/// A `--add-local` value before an id has been assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LocalPet {
    name: String,
    kind: String,
    id: Option<u64>,
}

fn parse_local_pet(raw: &str) -> Result<LocalPet, CliError> {
    let invalid = |reason: &str| CliError::Validation {
        field: "--add-local".into(),
        reason: format!("'{raw}': {reason} (expected NAME:TYPE[:ID])"),
    };

    let mut parts = raw.split(':');
    let name = parts.next().map(str::trim).unwrap_or_default();
    let kind = parts.next().map(str::trim).unwrap_or_default();
    let id = parts.next().map(str::trim);
    if parts.next().is_some() {
        return Err(invalid("too many fields"));
    }
    if name.is_empty() || kind.is_empty() {
        return Err(invalid("name and type are required"));
    }
    let id = id
        .map(|s| s.parse::<u64>().map_err(|_| invalid("id must be a number")))
        .transpose()?;

    Ok(LocalPet {
        name: name.to_owned(),
        kind: kind.to_owned(),
        id,
    })
}

/// Turn parsed values into pets, numbering unassigned ids after `max_id`.
fn assign_ids(locals: Vec<LocalPet>, max_id: u64) -> Vec<Pet> {
    let mut next = max_id;
    locals
        .into_iter()
        .map(|local| {
            let id = local.id.unwrap_or_else(|| {
                next = next.saturating_add(1);
                next
            });
            Pet {
                id,
                name: local.name,
                kind: local.kind,
                image: String::new(),
                adopted: AdoptionStatus::available(),
            }
        })
        .collect()
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(client: PetClient, args: PetsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let color = output::should_color(&global.color);

    match args.command {
        PetsCommand::List { add_local } => {
            // Validate input before touching the network.
            let locals = add_local
                .iter()
                .map(|raw| parse_local_pet(raw))
                .collect::<Result<Vec<_>, _>>()?;

            let list = PetListController::new(client);
            let outcome = list.refresh().await;
            debug!(%outcome, "list refresh finished");

            let state = list.state();
            if let Some(message) = state.phase.error_message() {
                return Err(CliError::from_failure(message, list.last_error().as_deref()));
            }

            let max_id = state.pets.iter().map(|p| p.id).max().unwrap_or(0);
            for pet in assign_ids(locals, max_id) {
                info!(id = pet.id, name = %pet.name, "adding local pet");
                list.add_local(pet);
            }

            let state = list.state();
            list.close();

            if state.pets.is_empty() && matches!(global.output, OutputFormat::Table) {
                if !global.quiet {
                    eprintln!("No pets yet!");
                }
                return Ok(());
            }

            let out = output::render_list(
                &global.output,
                state.pets.as_slice(),
                |p| PetRow::from_pet(p, color),
                |p| p.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        PetsCommand::Get { id, retry } => {
            let detail_ctl = PetDetailController::new(client);
            detail_ctl.load(PetId::from(id)).await;

            let mut attempt = 0;
            while attempt < retry && detail_ctl.state().phase.error_message().is_some() {
                attempt += 1;
                info!(attempt, of = retry, "retrying pet load");
                detail_ctl.refresh().await;
            }

            let state = detail_ctl.state();
            detail_ctl.close();

            let Some(pet) = state.pet else {
                let message = state
                    .phase
                    .error_message()
                    .unwrap_or(adoptly_core::DETAIL_LOAD_FAILED);
                return Err(CliError::from_failure(
                    message,
                    detail_ctl.last_error().as_deref(),
                ));
            };

            let out = output::render_single(
                &global.output,
                pet.as_ref(),
                |p| detail(p, color),
                |p| p.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
