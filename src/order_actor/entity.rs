use chrono::Utc;
use crate::actor_framework::Entity;
use crate::domain::{Order, OrderCreate, OrderForm};

impl Entity for Order {
    type Id = String;
    type CreateParams = OrderCreate;
    type Patch = OrderForm;

    fn id(&self) -> &String { &self.id }

    /// Creates a new Order owned by `params.user_id`.
    ///
    /// The creation timestamp is assigned here, alongside the ID.
    fn from_create_params(id: String, params: OrderCreate) -> Result<Self, String> {
        params.form.validate()?;
        Ok(Order::from_form(id, params.user_id, params.user_email, params.form, Utc::now()))
    }

    /// Replaces every editable field after validating the submitted form.
    fn on_update(&mut self, patch: OrderForm) -> Result<(), String> {
        patch.validate()?;
        self.apply_form(patch);
        Ok(())
    }
}
