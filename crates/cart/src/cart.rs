use serde::{Deserialize, Serialize};

use plantpal_catalog::Product;
use plantpal_core::{Aggregate, DomainError, Event, Money, ProductId};

/// Cart line: a product and how many of it.
///
/// Stored with a full product snapshot so the cart renders without a catalog lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(rename = "plant")]
    pub product: Product,
    /// Always at least 1.
    pub quantity: u32,
}

impl CartLine {
    pub fn product_id(&self) -> &ProductId {
        &self.product.id
    }

    /// Unit price times quantity.
    pub fn line_total(&self) -> Money {
        self.product.price.times(self.quantity)
    }
}

/// Aggregate root: Cart.
///
/// # Invariants
/// - At most one line per product id.
/// - Every line has quantity >= 1.
///
/// Serialized as the bare list of lines.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<CartLine>", into = "Vec<CartLine>")]
pub struct Cart {
    lines: Vec<CartLine>,
    version: u64,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a cart from stored lines, merging duplicates and dropping empty lines.
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        let mut merged: Vec<CartLine> = Vec::with_capacity(lines.len());
        for line in lines.into_iter().filter(|l| l.quantity > 0) {
            match merged.iter_mut().find(|m| m.product.id == line.product.id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(line.quantity)
                }
                None => merged.push(line),
            }
        }
        Self {
            lines: merged,
            version: 0,
        }
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.line(product_id).is_some()
    }

    pub fn quantity_of(&self, product_id: &ProductId) -> Option<u32> {
        self.line(product_id).map(|l| l.quantity)
    }

    /// Sum of unit price times quantity. Recomputed on every call.
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Sum of quantities. Recomputed on every call.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    fn line(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.product.id == product_id)
    }
}

impl From<Vec<CartLine>> for Cart {
    fn from(lines: Vec<CartLine>) -> Self {
        Self::from_lines(lines)
    }
}

impl From<Cart> for Vec<CartLine> {
    fn from(cart: Cart) -> Self {
        cart.lines
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CartCommand {
    /// Add `quantity` of a product, merging into an existing line.
    AddItem { product: Product, quantity: u32 },
    RemoveItem { product_id: ProductId },
    /// Replace a line's quantity; zero or below removes the line.
    SetQuantity { product_id: ProductId, quantity: i64 },
    Clear,
}

impl CartCommand {
    pub fn add(product: Product, quantity: u32) -> Self {
        Self::AddItem { product, quantity }
    }

    pub fn remove(product_id: ProductId) -> Self {
        Self::RemoveItem { product_id }
    }

    pub fn set_quantity(product_id: ProductId, quantity: i64) -> Self {
        Self::SetQuantity {
            product_id,
            quantity,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CartEvent {
    LineAdded { product: Product, quantity: u32 },
    QuantityChanged { product_id: ProductId, quantity: u32 },
    LineRemoved { product_id: ProductId },
    Cleared,
}

impl Event for CartEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CartEvent::LineAdded { .. } => "cart.line_added",
            CartEvent::QuantityChanged { .. } => "cart.quantity_changed",
            CartEvent::LineRemoved { .. } => "cart.line_removed",
            CartEvent::Cleared => "cart.cleared",
        }
    }
}

impl Aggregate for Cart {
    type Command = CartCommand;
    type Event = CartEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            CartEvent::LineAdded { product, quantity } => {
                self.lines.push(CartLine {
                    product: product.clone(),
                    quantity: *quantity,
                });
            }
            CartEvent::QuantityChanged {
                product_id,
                quantity,
            } => {
                if let Some(line) = self.lines.iter_mut().find(|l| &l.product.id == product_id) {
                    line.quantity = *quantity;
                }
            }
            CartEvent::LineRemoved { product_id } => {
                self.lines.retain(|l| &l.product.id != product_id);
            }
            CartEvent::Cleared => self.lines.clear(),
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            CartCommand::AddItem { product, quantity } => self.handle_add(product, *quantity),
            CartCommand::RemoveItem { product_id } => Ok(self.handle_remove(product_id)),
            CartCommand::SetQuantity {
                product_id,
                quantity,
            } => self.handle_set_quantity(product_id, *quantity),
            CartCommand::Clear => Ok(self.handle_clear()),
        }
    }

    fn version(&self) -> u64 {
        self.version
    }
}

impl Cart {
    fn handle_add(&self, product: &Product, quantity: u32) -> Result<Vec<CartEvent>, DomainError> {
        if quantity == 0 {
            return Err(DomainError::validation("quantity to add must be at least 1"));
        }

        Ok(vec![match self.line(&product.id) {
            Some(existing) => CartEvent::QuantityChanged {
                product_id: product.id.clone(),
                quantity: existing.quantity.saturating_add(quantity),
            },
            None => CartEvent::LineAdded {
                product: product.clone(),
                quantity,
            },
        }])
    }

    fn handle_remove(&self, product_id: &ProductId) -> Vec<CartEvent> {
        if self.contains(product_id) {
            vec![CartEvent::LineRemoved {
                product_id: product_id.clone(),
            }]
        } else {
            vec![]
        }
    }

    fn handle_set_quantity(
        &self,
        product_id: &ProductId,
        quantity: i64,
    ) -> Result<Vec<CartEvent>, DomainError> {
        if quantity <= 0 {
            return Ok(self.handle_remove(product_id));
        }

        let Some(existing) = self.line(product_id) else {
            return Err(DomainError::not_found(format!("cart line for product {product_id}")));
        };
        let quantity = u32::try_from(quantity)
            .map_err(|_| DomainError::validation(format!("quantity {quantity} is too large")))?;

        if existing.quantity == quantity {
            return Ok(vec![]);
        }
        Ok(vec![CartEvent::QuantityChanged {
            product_id: product_id.clone(),
            quantity,
        }])
    }

    fn handle_clear(&self) -> Vec<CartEvent> {
        if self.lines.is_empty() {
            vec![]
        } else {
            vec![CartEvent::Cleared]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plantpal_catalog::Catalog;
    use proptest::prelude::*;

    fn plants() -> Vec<Product> {
        Catalog::builtin().unwrap().products().to_vec()
    }

    fn run(cart: &Cart, command: CartCommand) -> Cart {
        cart.execute(&command).unwrap().state
    }

    #[test]
    fn adding_same_product_twice_merges_into_one_line() {
        let plants = plants();
        let cart = run(&Cart::new(), CartCommand::add(plants[0].clone(), 1));
        let cart = run(&cart, CartCommand::add(plants[0].clone(), 1));

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.quantity_of(&plants[0].id), Some(2));
        assert_eq!(cart.version(), 2);
    }

    #[test]
    fn add_with_zero_quantity_is_rejected() {
        let plants = plants();
        let err = Cart::new()
            .handle(&CartCommand::add(plants[0].clone(), 0))
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn set_quantity_zero_or_negative_removes_line() {
        let plants = plants();
        for q in [0, -1, -50] {
            let cart = run(&Cart::new(), CartCommand::add(plants[1].clone(), 3));
            let cart = run(&cart, CartCommand::set_quantity(plants[1].id.clone(), q));
            assert!(cart.is_empty(), "quantity {q} should remove the line");
        }
    }

    #[test]
    fn set_quantity_replaces_existing_quantity() {
        let plants = plants();
        let cart = run(&Cart::new(), CartCommand::add(plants[1].clone(), 3));
        let cart = run(&cart, CartCommand::set_quantity(plants[1].id.clone(), 7));
        assert_eq!(cart.quantity_of(&plants[1].id), Some(7));
        assert_eq!(cart.item_count(), 7);
    }

    #[test]
    fn set_quantity_for_missing_line_is_not_found() {
        let plants = plants();
        let cart = run(&Cart::new(), CartCommand::add(plants[0].clone(), 1));

        let err = cart
            .handle(&CartCommand::set_quantity(plants[2].id.clone(), 4))
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));

        // Removing via zero on a missing line stays a no-op.
        let executed = cart
            .execute(&CartCommand::set_quantity(plants[2].id.clone(), 0))
            .unwrap();
        assert!(executed.is_noop());
    }

    #[test]
    fn remove_missing_and_clear_empty_are_noops() {
        let plants = plants();
        let cart = Cart::new();
        assert!(cart.execute(&CartCommand::remove(plants[0].id.clone())).unwrap().is_noop());
        assert!(cart.execute(&CartCommand::Clear).unwrap().is_noop());
    }

    #[test]
    fn totals_follow_lines() {
        let plants = plants();
        // 45.99 * 2 + 32.99 = 124.97
        let cart = run(&Cart::new(), CartCommand::add(plants[0].clone(), 2));
        let cart = run(&cart, CartCommand::add(plants[1].clone(), 1));
        assert_eq!(cart.subtotal(), Money::new(124, 97));
        assert_eq!(cart.item_count(), 3);

        let cart = run(&cart, CartCommand::Clear);
        assert_eq!(cart.subtotal(), Money::ZERO);
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn serialized_form_round_trips_ids_and_quantities() {
        let plants = plants();
        let cart = run(&Cart::new(), CartCommand::add(plants[0].clone(), 2));
        let cart = run(&cart, CartCommand::add(plants[3].clone(), 5));

        let json = serde_json::to_string(&cart).unwrap();
        let restored: Cart = serde_json::from_str(&json).unwrap();

        let summary = |c: &Cart| -> Vec<(ProductId, u32)> {
            c.lines().iter().map(|l| (l.product_id().clone(), l.quantity)).collect()
        };
        assert_eq!(summary(&restored), summary(&cart));
        assert_eq!(restored.subtotal(), cart.subtotal());
    }

    #[test]
    fn stored_lines_are_normalized() {
        let plants = plants();
        let json = serde_json::json!([
            { "plant": plants[0], "quantity": 1 },
            { "plant": plants[0], "quantity": 2 },
            { "plant": plants[1], "quantity": 0 },
        ]);
        let cart: Cart = serde_json::from_value(json).unwrap();
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.quantity_of(&plants[0].id), Some(3));
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add(usize, u32),
        Remove(usize),
        Set(usize, i64),
        Clear,
    }

    fn arb_op() -> impl Strategy<Value = Op> {
        prop_oneof![
            4 => (0usize..6, 1u32..5).prop_map(|(i, q)| Op::Add(i, q)),
            2 => (0usize..6).prop_map(Op::Remove),
            3 => (0usize..6, -3i64..10).prop_map(|(i, q)| Op::Set(i, q)),
            1 => Just(Op::Clear),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: after any operation sequence the cart matches a simple
        /// id -> quantity model, lines stay unique and positive, and totals
        /// equal the sum over lines.
        #[test]
        fn cart_matches_model_after_random_operations(ops in prop::collection::vec(arb_op(), 0..40)) {
            let plants = plants();
            let mut cart = Cart::new();
            let mut model: Vec<(ProductId, u32)> = Vec::new();

            for op in ops {
                let command = match op {
                    Op::Add(i, q) => {
                        match model.iter_mut().find(|(id, _)| *id == plants[i].id) {
                            Some((_, existing)) => *existing += q,
                            None => model.push((plants[i].id.clone(), q)),
                        }
                        CartCommand::add(plants[i].clone(), q)
                    }
                    Op::Remove(i) => {
                        model.retain(|(id, _)| *id != plants[i].id);
                        CartCommand::remove(plants[i].id.clone())
                    }
                    Op::Set(i, q) => {
                        if q <= 0 {
                            model.retain(|(id, _)| *id != plants[i].id);
                        } else if let Some((_, existing)) = model.iter_mut().find(|(id, _)| *id == plants[i].id) {
                            *existing = q as u32;
                        }
                        CartCommand::set_quantity(plants[i].id.clone(), q)
                    }
                    Op::Clear => {
                        model.clear();
                        CartCommand::Clear
                    }
                };

                match cart.execute(&command) {
                    Ok(executed) => cart = executed.state,
                    Err(DomainError::NotFound(_)) => {}
                    Err(other) => prop_assert!(false, "unexpected error {other:?}"),
                }
            }

            let actual: Vec<(ProductId, u32)> =
                cart.lines().iter().map(|l| (l.product_id().clone(), l.quantity)).collect();
            prop_assert_eq!(&actual, &model);
            prop_assert!(cart.lines().iter().all(|l| l.quantity >= 1));

            let expected_subtotal: Money = model
                .iter()
                .map(|(id, q)| {
                    let unit = plants.iter().find(|p| p.id == *id).map_or(Money::ZERO, |p| p.price);
                    unit.times(*q)
                })
                .sum();
            prop_assert_eq!(cart.subtotal(), expected_subtotal);
            let expected_count: u64 = model.iter().map(|(_, q)| u64::from(*q)).sum();
            prop_assert_eq!(cart.item_count(), expected_count);
        }
    }
}
