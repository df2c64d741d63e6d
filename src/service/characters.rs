//! Character flows
//!
//! Authorization, validation and redaction composed around one request.
//! Persistence is the caller's job: flows return the record to store or
//! decide whether an operation may go ahead.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::{ServiceError, ServiceResult};
use crate::access::{AccessContext, Redactor, Role};
use crate::character::{Character, CharacterDraft, CharacterReference};
use crate::executor::QueryExecution;
use crate::guide::{Guide, Universe};
use crate::observability::{log_event_with_fields, Event};
use crate::planner::{CharacterFilter, CharacterQueryPlanner, SortMode};
use crate::validator::{CharacterValidator, ValidationError, ValidationResult};

/// One page of a character list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterPage {
    pub characters: Vec<CharacterReference>,
    pub page: u64,
    /// Matching characters across all pages
    pub total: u64,
}

pub struct CharacterService {
    planner: CharacterQueryPlanner,
}

impl CharacterService {
    pub fn new(page_size: u64) -> Self {
        Self {
            planner: CharacterQueryPlanner::new(page_size),
        }
    }

    /// Validates a draft and builds the character to store
    pub fn create(
        &self,
        guide: &Guide,
        universe_id: Uuid,
        draft: &CharacterDraft,
        ctx: &AccessContext,
    ) -> ServiceResult<Character> {
        let draft = logged(CharacterValidator::new(guide).validate_draft(draft))?;

        let now = Utc::now();
        let character = Character {
            id: Uuid::new_v4(),
            universe_id,
            owner_id: ctx.user_id,
            name: draft.name,
            tag: draft.tag,
            fields: draft.fields,
            meta: draft.meta,
            created_at: now,
            updated_at: now,
        };
        log_validated(&character);
        Ok(character)
    }

    /// Validates an edited character against the stored one.
    ///
    /// The owner is always carried over from `existing`; `updatedAt` is
    /// refreshed.
    pub fn update(
        &self,
        guide: &Guide,
        existing: &Character,
        edited: &Character,
        ctx: &AccessContext,
    ) -> ServiceResult<Character> {
        require_owner_or_privileged(ctx, existing, "edit")?;

        if edited.id != existing.id {
            return Err(ServiceError::ImmutableFieldChanged { field: "id" });
        }
        if edited.universe_id != existing.universe_id {
            return Err(ServiceError::ImmutableFieldChanged { field: "universeId" });
        }
        if edited.created_at != existing.created_at {
            return Err(ServiceError::ImmutableFieldChanged { field: "createdAt" });
        }
        if edited.updated_at != existing.updated_at {
            return Err(ServiceError::ImmutableFieldChanged { field: "updatedAt" });
        }

        let draft = CharacterDraft {
            name: edited.name.clone(),
            tag: edited.tag.clone(),
            fields: edited.fields.clone(),
            meta: edited.meta.clone(),
        };
        let draft = logged(CharacterValidator::new(guide).validate_draft(&draft))?;

        let character = Character {
            id: existing.id,
            universe_id: existing.universe_id,
            owner_id: existing.owner_id,
            name: draft.name,
            tag: draft.tag,
            fields: draft.fields,
            meta: draft.meta,
            created_at: existing.created_at,
            updated_at: Utc::now(),
        };
        log_validated(&character);
        Ok(character)
    }

    /// Returns the character as `ctx` may see it
    pub fn view(&self, character: &Character, ctx: &AccessContext) -> ServiceResult<Character> {
        if character.meta.hidden && !ctx.bypasses_redaction(character.owner_id) {
            return Err(denied(ctx, "view", "You do not have permission to view this character"));
        }
        Ok(Redactor::view(character, ctx))
    }

    /// Decides whether `ctx` may delete the character
    pub fn authorize_delete(&self, character: &Character, ctx: &AccessContext) -> ServiceResult<()> {
        require_owner_or_privileged(ctx, character, "delete")
    }

    /// Decides whether `ctx` may delete every character of a universe
    pub fn authorize_delete_all(&self, ctx: &AccessContext) -> ServiceResult<()> {
        if ctx.role < Role::Owner {
            return Err(denied(
                ctx,
                "delete_all",
                "Only the universe owner can delete all characters",
            ));
        }
        Ok(())
    }

    /// Lists one page of a universe's characters, redacted for `ctx`
    pub fn list<E: QueryExecution + ?Sized>(
        &self,
        executor: &E,
        universe: &Universe,
        ctx: &AccessContext,
        filter: &CharacterFilter,
    ) -> ServiceResult<CharacterPage> {
        let mut filter = filter.clone();
        if filter.sort == SortMode::Lexicographic && !universe.settings.allow_lexicographical_ordering {
            filter.sort = SortMode::Nominal;
        }

        let plan = self.planner.plan(universe.id, ctx, &filter)?;
        log_event_with_fields(
            Event::QueryPlanned,
            &[
                ("universe", &universe.id.to_string()),
                ("page", &filter.page.to_string()),
                ("sort", filter.sort.as_str()),
            ],
        );

        let rows = executor.select(&plan.select).map_err(query_failed)?;
        let total = executor.count(&plan.count).map_err(query_failed)?;
        log_event_with_fields(
            Event::QueryExecuted,
            &[
                ("universe", &universe.id.to_string()),
                ("rows", &rows.len().to_string()),
                ("total", &total.to_string()),
            ],
        );

        Ok(CharacterPage {
            characters: Redactor::view_all(&rows, ctx),
            page: filter.page,
            total,
        })
    }
}

fn require_owner_or_privileged(
    ctx: &AccessContext,
    character: &Character,
    action: &str,
) -> ServiceResult<()> {
    if ctx.is_privileged() || ctx.owns(character.owner_id) {
        return Ok(());
    }
    Err(denied(
        ctx,
        action,
        &format!("You do not have permission to {} this character", action),
    ))
}

fn denied(ctx: &AccessContext, action: &str, reason: &str) -> ServiceError {
    log_event_with_fields(
        Event::PrivilegeDenied,
        &[
            ("action", action),
            ("role", ctx.role.as_str()),
            ("user", &ctx.user_id.to_string()),
        ],
    );
    ServiceError::PrivilegeDenied(reason.to_string())
}

fn logged<T>(result: ValidationResult<T>) -> ServiceResult<T> {
    result.map_err(|err: ValidationError| {
        log_event_with_fields(
            Event::ValidationRejected,
            &[
                ("code", err.code().code()),
                ("group", err.group().unwrap_or("")),
                ("field", err.field().unwrap_or("")),
            ],
        );
        ServiceError::Validation(err)
    })
}

fn log_validated(character: &Character) {
    log_event_with_fields(
        Event::CharacterValidated,
        &[
            ("character", &character.id.to_string()),
            ("groups", &character.fields.groups.len().to_string()),
        ],
    );
}

fn query_failed(err: crate::executor::ExecutionError) -> ServiceError {
    log_event_with_fields(Event::QueryFailed, &[("error", &err.to_string())]);
    ServiceError::Execution(err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::{
        CharacterField, CharacterFields, CharacterGroup, CharacterMeta, CharacterName, FieldValue,
    };
    use crate::executor::MemoryCharacterStore;
    use crate::guide::GuideDefaults;
    use crate::validator::ValidationErrorCode;

    fn biography(text: &str) -> CharacterFields {
        CharacterFields::new().with_group(
            "General",
            CharacterGroup::new().with_field(
                "Biography",
                CharacterField::new(FieldValue::Text(text.into())),
            ),
        )
    }

    fn draft(name: &str) -> CharacterDraft {
        CharacterDraft {
            name: name.into(),
            tag: String::new(),
            fields: biography("  Ring bearer  "),
            meta: CharacterMeta::default(),
        }
    }

    fn universe() -> Universe {
        Universe::new("Middle-earth", "", &GuideDefaults::standard())
    }

    #[test]
    fn test_create_normalizes_and_assigns_identity() {
        let service = CharacterService::new(20);
        let universe = universe();
        let owner = AccessContext::member(Uuid::new_v4());

        let character = service
            .create(&universe.guide, universe.id, &draft(" Frodo "), &owner)
            .unwrap();
        assert_eq!(character.name, "Frodo");
        assert_eq!(character.owner_id, owner.user_id);
        assert_eq!(character.universe_id, universe.id);
        assert_eq!(
            character.fields.field("General", "Biography").unwrap().value,
            Some(FieldValue::Text("Ring bearer".into()))
        );
    }

    #[test]
    fn test_create_rejects_bad_fields() {
        let service = CharacterService::new(20);
        let universe = universe();
        let mut bad = draft("Frodo");
        bad.fields = biography("   ");

        let err = service
            .create(&universe.guide, universe.id, &bad, &AccessContext::member(Uuid::new_v4()))
            .unwrap_err();
        match err {
            ServiceError::Validation(e) => assert_eq!(e.code(), ValidationErrorCode::RangeViolation),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_update_rules() {
        let service = CharacterService::new(20);
        let universe = universe();
        let owner = AccessContext::member(Uuid::new_v4());
        let existing = service
            .create(&universe.guide, universe.id, &draft("Frodo"), &owner)
            .unwrap();

        let mut edited = existing.clone();
        edited.name = "Mr. Underhill".into();
        let updated = service.update(&universe.guide, &existing, &edited, &owner).unwrap();
        assert_eq!(updated.name, "Mr. Underhill");
        assert_eq!(updated.created_at, existing.created_at);
        assert!(updated.updated_at >= existing.updated_at);

        let stranger = AccessContext::member(Uuid::new_v4());
        assert!(matches!(
            service.update(&universe.guide, &existing, &edited, &stranger),
            Err(ServiceError::PrivilegeDenied(_))
        ));

        let mut moved = existing.clone();
        moved.universe_id = Uuid::new_v4();
        assert!(matches!(
            service.update(&universe.guide, &existing, &moved, &owner),
            Err(ServiceError::ImmutableFieldChanged { field: "universeId" })
        ));
    }

    #[test]
    fn test_update_keeps_owner() {
        let service = CharacterService::new(20);
        let universe = universe();
        let owner = AccessContext::member(Uuid::new_v4());
        let existing = service
            .create(&universe.guide, universe.id, &draft("Frodo"), &owner)
            .unwrap();

        let mut edited = existing.clone();
        edited.owner_id = Uuid::new_v4();
        let admin = AccessContext::new(Uuid::new_v4(), Role::Admin);
        let updated = service.update(&universe.guide, &existing, &edited, &admin).unwrap();
        assert_eq!(updated.owner_id, owner.user_id);
    }

    #[test]
    fn test_view_hidden_character() {
        let service = CharacterService::new(20);
        let universe = universe();
        let owner = AccessContext::member(Uuid::new_v4());
        let mut hidden = draft("Gollum");
        hidden.meta.hidden = true;
        let character = service
            .create(&universe.guide, universe.id, &hidden, &owner)
            .unwrap();

        assert!(service.view(&character, &owner).is_ok());
        assert!(service
            .view(&character, &AccessContext::new(Uuid::new_v4(), Role::Admin))
            .is_ok());
        assert!(matches!(
            service.view(&character, &AccessContext::member(Uuid::new_v4())),
            Err(ServiceError::PrivilegeDenied(_))
        ));
    }

    #[test]
    fn test_delete_authorization() {
        let service = CharacterService::new(20);
        let universe = universe();
        let owner = AccessContext::member(Uuid::new_v4());
        let character = service
            .create(&universe.guide, universe.id, &draft("Frodo"), &owner)
            .unwrap();

        assert!(service.authorize_delete(&character, &owner).is_ok());
        assert!(service
            .authorize_delete(&character, &AccessContext::member(Uuid::new_v4()))
            .is_err());
        assert!(service
            .authorize_delete_all(&AccessContext::new(Uuid::new_v4(), Role::Admin))
            .is_err());
        assert!(service
            .authorize_delete_all(&AccessContext::new(Uuid::new_v4(), Role::Owner))
            .is_ok());
    }

    #[test]
    fn test_list_downgrades_disallowed_lexicographic_sort() {
        let service = CharacterService::new(20);
        let universe = universe();
        let owner = AccessContext::member(Uuid::new_v4());

        let mut zed = draft("Aaron Zed");
        zed.meta.name = CharacterName::new("Aaron", "Zed", "");
        let mut abe = draft("Zack Abe");
        abe.meta.name = CharacterName::new("Zack", "Abe", "");
        let characters = vec![
            service.create(&universe.guide, universe.id, &zed, &owner).unwrap(),
            service.create(&universe.guide, universe.id, &abe, &owner).unwrap(),
        ];
        let store = MemoryCharacterStore::from_characters(&characters);
        let filter = CharacterFilter::default().with_sort(SortMode::Lexicographic);

        let page = service.list(&store, &universe, &owner, &filter).unwrap();
        assert_eq!(page.characters[0].name, "Aaron Zed");
        assert_eq!(page.total, 2);

        let mut lexical = universe.clone();
        lexical.settings.allow_lexicographical_ordering = true;
        let page = service.list(&store, &lexical, &owner, &filter).unwrap();
        assert_eq!(page.characters[0].name, "Zack Abe");
    }

    #[test]
    fn test_list_redacts_rows() {
        let service = CharacterService::new(20);
        let universe = universe();
        let owner = AccessContext::member(Uuid::new_v4());
        let mut secret = draft("Strider");
        secret.meta.name_hidden = true;
        let characters = vec![service.create(&universe.guide, universe.id, &secret, &owner).unwrap()];
        let store = MemoryCharacterStore::from_characters(&characters);

        let viewer = AccessContext::member(Uuid::new_v4());
        let page = service
            .list(&store, &universe, &viewer, &CharacterFilter::default())
            .unwrap();
        assert_eq!(page.total, 1);
        assert!(page.characters[0].name.is_empty());

        let page = service
            .list(&store, &universe, &owner, &CharacterFilter::default())
            .unwrap();
        assert_eq!(page.characters[0].name, "Strider");
    }
}
