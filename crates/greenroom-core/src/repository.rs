//! [`GuestRepository`]: the in-memory guest collection and its audit log.
//!
//! The repository is owned by the session. Its fields are private; guests
//! change only through [`create`](GuestRepository::create),
//! [`update`](GuestRepository::update), [`delete`](GuestRepository::delete)
//! and [`import_batch`](GuestRepository::import_batch), and each of those
//! writes exactly one audit entry when it changes something.

use chrono::Utc;

use crate::{
  Error, Result,
  audit::{AuditAction, AuditLog, EntityType},
  guest::{Guest, GuestForm, GuestId, GuestPatch, Status},
  seed,
  session::ActingUser,
};

/// Entity id recorded for batch imports.
const BULK_ENTITY_ID: &str = "bulk";

#[derive(Debug, Clone)]
pub struct GuestRepository {
  guests: Vec<Guest>,
  audit:  AuditLog,
  user:   ActingUser,
}

impl GuestRepository {
  /// An empty repository acting on behalf of `user`.
  pub fn new(user: ActingUser) -> Self {
    Self::with_guests(user, Vec::new())
  }

  /// A repository pre-filled with `guests`. No audit entries are written.
  pub fn with_guests(user: ActingUser, guests: Vec<Guest>) -> Self {
    Self {
      guests,
      audit: AuditLog::new(),
      user,
    }
  }

  /// A repository holding the fixed newsroom seed list.
  pub fn seeded(user: ActingUser) -> Self {
    Self::with_guests(user, seed::seed_guests())
  }

  // ── Reads ─────────────────────────────────────────────────────────────

  pub fn guests(&self) -> &[Guest] { &self.guests }

  pub fn get(&self, id: &GuestId) -> Option<&Guest> {
    self.guests.iter().find(|g| &g.id == id)
  }

  pub fn audit_log(&self) -> &AuditLog { &self.audit }

  pub fn user(&self) -> &ActingUser { &self.user }

  // ── Mutations ─────────────────────────────────────────────────────────

  /// Create a guest from a submitted form.
  ///
  /// Status defaults to [`Status::Active`].
  pub fn create(&mut self, form: GuestForm) -> Result<Guest> {
    form.validate()?;
    let guest = self.build(form, Status::Active);

    tracing::info!(id = %guest.id, name = %guest.full_name(), "guest created");
    self.audit.record(
      &self.user.email,
      AuditAction::Creation,
      EntityType::Guest,
      guest.id.as_str(),
      format!("{} created", guest.full_name()),
    );
    self.guests.push(guest.clone());
    Ok(guest)
  }

  /// Merge `patch` onto the guest with `id`.
  ///
  /// An unknown id is reported as [`Error::GuestNotFound`] whatever the
  /// patch holds.
  pub fn update(&mut self, id: &GuestId, patch: GuestPatch) -> Result<Guest> {
    let guest = self
      .guests
      .iter_mut()
      .find(|g| &g.id == id)
      .ok_or_else(|| Error::GuestNotFound(id.clone()))?;
    patch.validate()?;

    patch.apply(guest);
    guest.updated_at = Utc::now();
    guest.last_modified_by = self.user.email.clone();
    let updated = guest.clone();

    tracing::info!(id = %updated.id, "guest updated");
    self.audit.record(
      &self.user.email,
      AuditAction::Modification,
      EntityType::Guest,
      updated.id.as_str(),
      format!("{} updated", updated.full_name()),
    );
    Ok(updated)
  }

  /// Remove the guest with `id`, returning it.
  ///
  /// Deleting an unknown id is a no-op and leaves the audit log untouched.
  pub fn delete(&mut self, id: &GuestId) -> Option<Guest> {
    let Some(index) = self.guests.iter().position(|g| &g.id == id) else {
      tracing::debug!(%id, "delete ignored: no such guest");
      return None;
    };
    let removed = self.guests.remove(index);

    tracing::info!(%id, "guest deleted");
    self.audit.record(
      &self.user.email,
      AuditAction::Deletion,
      EntityType::Guest,
      removed.id.as_str(),
      format!("{} deleted", removed.full_name()),
    );
    Some(removed)
  }

  /// Append a batch of imported guests in one step with a single audit
  /// entry.
  ///
  /// Status defaults to [`Status::ToContact`]. Every form is validated
  /// before anything is stored; one invalid form rejects the whole batch.
  pub fn import_batch(&mut self, forms: Vec<GuestForm>) -> Result<Vec<Guest>> {
    for form in &forms {
      form.validate()?;
    }
    if forms.is_empty() {
      return Ok(Vec::new());
    }

    let imported: Vec<Guest> = forms
      .into_iter()
      .map(|form| self.build(form, Status::ToContact))
      .collect();

    tracing::info!(count = imported.len(), "guests imported");
    self.audit.record(
      &self.user.email,
      AuditAction::Import,
      EntityType::Guests,
      BULK_ENTITY_ID,
      format!("{} guest(s) imported", imported.len()),
    );
    self.guests.extend(imported.iter().cloned());
    Ok(imported)
  }

  /// Turn a validated form into a stored guest with fresh identity and
  /// provenance.
  fn build(&self, form: GuestForm, default_status: Status) -> Guest {
    let now = Utc::now();
    Guest {
      id:               GuestId::generate(),
      surname:          form.surname,
      given_name:       form.given_name,
      status:           form.status.unwrap_or(default_status),
      sectors:          form.sectors,
      organization:     form.organization,
      role:             form.role,
      bio:              form.bio,
      notes:            form.notes,
      contact:          form.contact.normalized(),
      passages:         Vec::new(),
      created_at:       now,
      updated_at:       now,
      created_by:       self.user.email.clone(),
      last_modified_by: self.user.email.clone(),
    }
  }
}
