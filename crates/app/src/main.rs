use plantpal_app::{Storefront, StorefrontConfig};
use plantpal_catalog::{FEATURED_COUNT, FilterCriteria, SortKey, categories};

fn main() -> anyhow::Result<()> {
    plantpal_observability::init();

    let config = StorefrontConfig::from_env();
    let shop = Storefront::bootstrap(&config)?;

    for product in shop.catalog().featured(FEATURED_COUNT) {
        tracing::info!(id = %product.id, name = %product.name, price = %product.price, "featured");
    }
    tracing::info!(categories = ?categories(), "shop categories");

    let listing = shop.browse(&FilterCriteria::default(), SortKey::default());
    tracing::info!(
        listed = listing.len(),
        cart_items = shop.cart().item_count(),
        wishlist = shop.wishlist().items().len(),
        signed_in = shop.session().is_signed_in(),
        "storefront state"
    );
    Ok(())
}
