//! Client Repository

use crate::models::{Client, ClientDraft, new_id};
use crate::storage::{Storage, Store};
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text,
    validate_required_text,
};
use crate::utils::{AppError, AppResult};

/// All clients sorted by name
pub fn find_all(storage: &Storage) -> AppResult<Vec<Client>> {
    let mut clients: Vec<Client> = storage.get_all(Store::Clients)?;
    clients.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    Ok(clients)
}

pub fn find_by_id(storage: &Storage, id: &str) -> AppResult<Option<Client>> {
    Ok(storage.get(Store::Clients, id)?)
}

pub fn get(storage: &Storage, id: &str) -> AppResult<Client> {
    find_by_id(storage, id)?.ok_or_else(|| AppError::not_found("Cliente"))
}

pub fn create(storage: &Storage, draft: ClientDraft) -> AppResult<Client> {
    validate(&draft)?;
    let client = Client {
        id: new_id("cli"),
        name: draft.name.trim().to_string(),
        phone: draft.phone.trim().to_string(),
        email: draft.email.trim().to_string(),
        notes: draft.notes.trim().to_string(),
        history: Vec::new(),
    };
    storage.put(Store::Clients, &client.id, &client)?;
    Ok(client)
}

pub fn update(storage: &Storage, id: &str, draft: ClientDraft) -> AppResult<Client> {
    validate(&draft)?;
    let existing = get(storage, id)?;
    let client = Client {
        id: existing.id,
        name: draft.name.trim().to_string(),
        phone: draft.phone.trim().to_string(),
        email: draft.email.trim().to_string(),
        notes: draft.notes.trim().to_string(),
        history: existing.history,
    };
    storage.put(Store::Clients, &client.id, &client)?;
    Ok(client)
}

/// Delete a client. Appointments and invoices referencing it are kept
/// and rendered with a placeholder name.
pub fn delete(storage: &Storage, id: &str) -> AppResult<bool> {
    Ok(storage.delete(Store::Clients, id)?)
}

fn validate(draft: &ClientDraft) -> AppResult<()> {
    validate_required_text(&draft.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&draft.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&draft.email, "email", MAX_EMAIL_LEN)?;
    validate_optional_text(&draft.notes, "notes", MAX_NOTE_LEN)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str) -> ClientDraft {
        ClientDraft {
            name: name.into(),
            phone: "34600111222".into(),
            email: "ana@example.com".into(),
            notes: String::new(),
        }
    }

    #[test]
    fn create_requires_name() {
        let storage = Storage::open_in_memory().unwrap();
        let err = create(&storage, draft("   ")).unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
        assert!(find_all(&storage).unwrap().is_empty());
    }

    #[test]
    fn update_keeps_id_and_history() {
        let storage = Storage::open_in_memory().unwrap();
        let created = create(&storage, draft("Ana Pérez")).unwrap();

        let updated = update(&storage, &created.id, draft("Ana María Pérez")).unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Ana María Pérez");
    }

    #[test]
    fn find_all_sorts_by_name() {
        let storage = Storage::open_in_memory().unwrap();
        create(&storage, draft("bruno")).unwrap();
        create(&storage, draft("Ana")).unwrap();

        let names: Vec<String> = find_all(&storage).unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Ana", "bruno"]);
    }

    #[test]
    fn delete_missing_returns_false() {
        let storage = Storage::open_in_memory().unwrap();
        assert!(!delete(&storage, "cli_missing").unwrap());
    }
}
