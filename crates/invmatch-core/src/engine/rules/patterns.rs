//! Regex patterns and keyword vocabularies for invoice line extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Multiplication-style restaurant lines ("Burger x 3" / "3 x Burger").
    // Whitespace before/after the 'x' is required so names ending in 'x'
    // ("Box") are not split.
    pub static ref MULT_NAME_QTY: Regex = Regex::new(
        r"(?i)^(.+?)\s+[x×]\s*(\d+(?:\.\d+)?)\s*$"
    ).unwrap();

    pub static ref MULT_QTY_NAME: Regex = Regex::new(
        r"(?i)^(\d+(?:\.\d+)?)\s*[x×]\s+(.+)$"
    ).unwrap();

    // Free-form "Name Quantity [Unit]". The unit token is validated
    // against UNIT_WORDS separately.
    pub static ref QTY_UNIT_LINE: Regex = Regex::new(
        r"(?i)^(.+?)\s+(\d+(?:\.\d+)?)\s*([a-z]+)?\.?\s*$"
    ).unwrap();

    // Leading ordinal ("3. Tomatoes", "12) Onions").
    pub static ref ORDINAL_LINE: Regex = Regex::new(
        r"^(\d{1,3})[.)]\s+(.+)$"
    ).unwrap();

    pub static ref ORDINAL_PREFIX: Regex = Regex::new(
        r"^\d{1,3}[.)]\s*"
    ).unwrap();

    // Currency-shaped substring ("$12.99", "€ 8,50"). Kept verbatim -
    // no numeric currency parsing.
    pub static ref CURRENCY: Regex = Regex::new(
        r"[$€£]\s?\d{1,6}(?:[.,]\d{1,2})?"
    ).unwrap();

    // Quantity followed by a unit token ("5 kg", "2L", "3 pcs").
    pub static ref QTY_UNIT_SHAPE: Regex = Regex::new(
        r"(?i)\b\d+(?:\.\d+)?\s*(?:kg|g|lb|lbs|oz|ml|l|pcs|pc|ea|each|pack|box|bottle|jar|can|bag|case|cs|dozen|doz)\b"
    ).unwrap();

    // Phone-number shape ("(555) 123-4567", "+1 555-123-4567").
    pub static ref PHONE_SHAPE: Regex = Regex::new(
        r"(?:\+?\d{1,2}[\s\-.]?)?\(?\d{3}\)?[\s\-.]\d{3}[\s\-.]?\d{4}"
    ).unwrap();

    // Street-address shape: numeric token followed by a road-type word.
    pub static ref STREET_SHAPE: Regex = Regex::new(
        r"(?i)\b\d+\s+(?:[a-z]+\s+){0,3}(?:st|street|ave|avenue|blvd|boulevard|rd|road|ln|lane|hwy|highway|suite|ste)\b"
    ).unwrap();

    // Vendor indicator, anywhere on a line; capture is the trailing text.
    pub static ref VENDOR_LABEL: Regex = Regex::new(
        r"(?i)\b(?:vendor|supplier|restaurant|bill\s+from|sold\s+by|company|store|from)\b\s*[:\-]?\s*(.*)$"
    ).unwrap();

    // Invoice/receipt/order number: keyword, a label separator, then the
    // first alphanumeric-plus-hyphen token.
    pub static ref INVOICE_NUMBER: Regex = Regex::new(
        r"(?i)\b(?:invoice|receipt|order|inv)\b\s*(?:number|num\.?|no\.?|#|:)\s*[:#]?\s*([A-Za-z0-9][A-Za-z0-9\-]*)"
    ).unwrap();
}

/// Substrings that mark a line as definitely not an item (URLs, contact
/// labels, id-number labels).
pub const DEFINITE_NON_ITEM_TOKENS: &[&str] = &[
    "www", "http", "@", "tel:", "fax:", "invoice#", "order#", "inv#", "po#",
];

/// Billing/header vocabulary. A line carrying one of these words is
/// dropped unless an item keyword also appears.
pub const NON_ITEM_KEYWORDS: &[&str] = &[
    "total", "subtotal", "tax", "vat", "gst", "hst", "amount", "due",
    "thank", "thanks", "visit", "address", "phone", "cashier", "register",
    "payment", "change", "balance", "served", "table", "invoice", "receipt",
    "order", "date", "signature", "terms", "account", "card", "cash",
    "tender", "page", "ave", "avenue", "street", "blvd", "road", "suite",
    "city", "zip", "state", "country", "location",
];

/// Grocery/produce vocabulary that marks a plausible inventory item.
pub const ITEM_KEYWORDS: &[&str] = &[
    "tomato", "chicken", "beef", "pork", "lamb", "fish", "salmon", "tuna",
    "shrimp", "cheese", "milk", "cream", "butter", "yogurt", "egg", "bread",
    "flour", "sugar", "salt", "pepper", "rice", "oil", "vinegar", "sauce",
    "bean", "corn", "onion", "garlic", "potato", "carrot", "lettuce",
    "spinach", "mushroom", "apple", "banana", "orange", "lemon", "lime",
    "juice", "water", "soda", "coffee", "tea", "wine", "beer",
];

/// Prepared-food vocabulary for restaurant invoices.
pub const RESTAURANT_KEYWORDS: &[&str] = &[
    "pizza", "burger", "sandwich", "salad", "soup", "fries", "wings",
    "taco", "burrito", "sushi", "noodle", "curry", "steak", "pasta",
    "roll", "wrap", "combo", "platter", "appetizer", "dessert",
];

/// Recognized unit-of-measure tokens.
pub const UNIT_WORDS: &[&str] = &[
    "kg", "g", "gram", "grams", "lb", "lbs", "oz", "ml", "l", "liter",
    "liters", "litre", "litres", "pcs", "pc", "ea", "each", "pack", "packs",
    "box", "boxes", "bottle", "bottles", "jar", "jars", "can", "cans",
    "bag", "bags", "case", "cases", "cs", "dozen", "doz", "unit", "units",
];

/// Split a line into lowercase alphanumeric words.
fn words(line: &str) -> impl Iterator<Item = String> + '_ {
    line.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
}

/// Check word-level membership, tolerating plural `-s` and `-es` endings
/// ("burgers" -> "burger", "tomatoes" -> "tomato").
fn contains_word(line: &str, vocabulary: &[&str]) -> bool {
    words(line).any(|w| {
        vocabulary.contains(&w.as_str())
            || w.strip_suffix('s')
                .is_some_and(|base| vocabulary.contains(&base))
            || w.strip_suffix("es")
                .is_some_and(|base| vocabulary.contains(&base))
    })
}

/// Does the line carry billing/header vocabulary?
pub fn has_non_item_keyword(line: &str) -> bool {
    contains_word(line, NON_ITEM_KEYWORDS)
}

/// Does the line carry an item or restaurant-item keyword?
pub fn has_item_keyword(line: &str) -> bool {
    contains_word(line, ITEM_KEYWORDS) || contains_word(line, RESTAURANT_KEYWORDS)
}

/// Is the token a recognized unit of measure?
pub fn is_unit_word(token: &str) -> bool {
    UNIT_WORDS.contains(&token.to_lowercase().as_str())
}
