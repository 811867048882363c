//! Catalog
//!
//! Read-only menu data: named tabs, each listing products. The storefront only
//! ever reads from a [`Catalog`].

use std::{fs, path::Path};

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use slotmap::{SlotMap, new_key_type};
use thiserror::Error;

use crate::money::{Price, PriceError, currency_from_code};

pub mod fixture;

use fixture::CatalogFixture;

const DEFAULT_MENU_YAML: &str = include_str!("../../fixtures/menu/default.yml");

new_key_type! {
    /// Product Key
    pub struct ProductKey;
}

/// Catalog loading and lookup errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// IO error reading a catalog file
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// A product price could not be read
    #[error("Invalid product price: {0}")]
    Price(#[from] PriceError),

    /// A product is priced in a different currency from the menu
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// Two tabs share an id
    #[error("Duplicate tab id: {0}")]
    DuplicateTab(String),

    /// No tab with this id exists
    #[error("Unknown tab: {0}")]
    UnknownTab(String),

    /// The menu defines no tabs
    #[error("Catalog has no tabs")]
    Empty,
}

/// Product
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Product name
    pub name: String,

    /// Short description
    pub description: String,

    /// Shelf price
    pub price: Price,

    /// Image reference
    pub image: String,
}

/// A menu tab and the products it lists, in display order.
#[derive(Debug, Clone)]
pub struct Category {
    id: String,
    title: String,
    products: Vec<ProductKey>,
}

impl Category {
    /// Tab id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Heading shown above the products.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Product keys in display order.
    pub fn product_keys(&self) -> &[ProductKey] {
        &self.products
    }
}

/// Catalog
#[derive(Debug)]
pub struct Catalog {
    products: SlotMap<ProductKey, Product>,
    tabs: Vec<Category>,
    tab_index: FxHashMap<String, usize>,
    currency: &'static Currency,
}

impl Catalog {
    /// The menu compiled into the crate.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled fixture fails to parse.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_yaml_str(DEFAULT_MENU_YAML)
    }

    /// Load a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its contents are invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml_str(&contents)
    }

    /// Parse a catalog from YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid, a price is malformed or in the
    /// wrong currency, a tab id repeats, or no tabs are defined.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        let fixture: CatalogFixture = serde_norway::from_str(yaml)?;
        let currency = currency_from_code(&fixture.currency)?;

        if fixture.tabs.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut products = SlotMap::with_key();
        let mut tabs = Vec::with_capacity(fixture.tabs.len());
        let mut tab_index = FxHashMap::default();

        for tab in fixture.tabs {
            if tab_index.contains_key(&tab.id) {
                return Err(CatalogError::DuplicateTab(tab.id));
            }

            let mut keys = Vec::with_capacity(tab.products.len());

            for product_fixture in tab.products {
                keys.push(products.insert(product_fixture.into_product(currency)?));
            }

            tab_index.insert(tab.id.clone(), tabs.len());
            tabs.push(Category {
                id: tab.id,
                title: tab.title,
                products: keys,
            });
        }

        Ok(Self {
            products,
            tabs,
            tab_index,
            currency,
        })
    }

    /// Currency every product is priced in.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Look up a tab by id.
    pub fn category(&self, tab_id: &str) -> Option<&Category> {
        self.tab_index
            .get(tab_id)
            .and_then(|&index| self.tabs.get(index))
    }

    /// Look up a product by key.
    pub fn product(&self, key: ProductKey) -> Option<&Product> {
        self.products.get(key)
    }

    /// Products listed under a tab, in display order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownTab`] if no tab has this id.
    pub fn products_in(&self, tab_id: &str) -> Result<Vec<&Product>, CatalogError> {
        let category = self
            .category(tab_id)
            .ok_or_else(|| CatalogError::UnknownTab(tab_id.to_string()))?;

        Ok(category
            .products
            .iter()
            .filter_map(|&key| self.products.get(key))
            .collect())
    }

    /// Iterate over the tabs in display order.
    pub fn tabs(&self) -> impl Iterator<Item = &Category> {
        self.tabs.iter()
    }

    /// Number of products across all tabs.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog lists no products at all.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use rusty_money::{Money, iso::PHP};
    use testresult::TestResult;

    use super::*;

    const SMALL_MENU: &str = r"
currency: USD
tabs:
  - id: drinks
    title: Drinks
    products:
      - name: Milk Tea
        price: 60 USD
      - name: Coffee
        price: 70 USD
  - id: empty
    title: Nothing here
";

    #[test]
    fn bundled_menu_loads() -> TestResult {
        let catalog = Catalog::bundled()?;

        let ids: Vec<&str> = catalog.tabs().map(Category::id).collect();

        assert_eq!(ids, vec!["special-burgers", "burgers", "milktea"]);
        assert_eq!(catalog.currency(), PHP);
        assert_eq!(catalog.len(), 13);

        Ok(())
    }

    #[test]
    fn products_in_keeps_display_order() -> TestResult {
        let catalog = Catalog::bundled()?;

        let names: Vec<&str> = catalog
            .products_in("burgers")?
            .into_iter()
            .map(|product| product.name.as_str())
            .collect();

        assert_eq!(
            names,
            vec![
                "Tendercrisp Bacon Cheeseburger",
                "Double Beef Burger",
                "Spicy Chicken Burger",
                "Classic Cheeseburger",
                "Bacon & Egg Burger",
            ]
        );

        Ok(())
    }

    #[test]
    fn bundled_prices_are_php() -> TestResult {
        let catalog = Catalog::bundled()?;
        let special = catalog.products_in("special-burgers")?;

        let first = special.first().ok_or("special burgers tab is empty")?;

        assert_eq!(first.price, Money::from_minor(20_000, PHP));
        assert_eq!(first.image, "burger4.jpg");

        Ok(())
    }

    #[test]
    fn unknown_tab_errors() -> TestResult {
        let catalog = Catalog::from_yaml_str(SMALL_MENU)?;

        assert!(catalog.category("desserts").is_none());
        assert!(matches!(
            catalog.products_in("desserts"),
            Err(CatalogError::UnknownTab(id)) if id == "desserts"
        ));

        Ok(())
    }

    #[test]
    fn tab_without_products_is_allowed() -> TestResult {
        let catalog = Catalog::from_yaml_str(SMALL_MENU)?;

        assert!(catalog.products_in("empty")?.is_empty());

        Ok(())
    }

    #[test]
    fn duplicate_tab_rejected() {
        let yaml = r"
currency: USD
tabs:
  - id: drinks
    title: Drinks
  - id: drinks
    title: More drinks
";

        assert!(matches!(
            Catalog::from_yaml_str(yaml),
            Err(CatalogError::DuplicateTab(id)) if id == "drinks"
        ));
    }

    #[test]
    fn empty_menu_rejected() {
        assert!(matches!(
            Catalog::from_yaml_str("currency: USD\ntabs: []\n"),
            Err(CatalogError::Empty)
        ));
    }

    #[test]
    fn unknown_currency_rejected() {
        assert!(matches!(
            Catalog::from_yaml_str("currency: XYZ\ntabs: []\n"),
            Err(CatalogError::Price(PriceError::UnknownCurrency(_)))
        ));
    }

    #[test]
    fn load_reads_file() -> TestResult {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(SMALL_MENU.as_bytes())?;

        let catalog = Catalog::load(file.path())?;

        assert_eq!(catalog.len(), 2);

        Ok(())
    }

    #[test]
    fn load_missing_file_errors() {
        assert!(matches!(
            Catalog::load("/definitely/not/here.yml"),
            Err(CatalogError::Io(_))
        ));
    }
}
