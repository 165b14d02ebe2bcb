//! Static bilingual vocabulary. Everything here is fixed at compile time and
//! iterated in declaration order: first-match-wins scans over these tables are
//! part of the observable matching contract, so the ordering matters.

/// Region used when a query names no recognizable location.
pub const DEFAULT_REGION: &str = "NCR";

/// Tagalog commodity name -> canonical English name.
///
/// Scanned in order by the normalizer; longer terms are NOT preferred over
/// shorter ones that happen to be substrings. Acceptable for this curated
/// vocabulary, a precision trap for a larger one.
pub const COMMODITY_PAIRS: &[(&str, &str)] = &[
    // Vegetables
    ("kamatis", "tomato"),
    ("talong", "eggplant"),
    ("sibuyas", "onion"),
    ("bawang", "garlic"),
    ("repolyo", "cabbage"),
    ("patatas", "potato"),
    ("kalabasa", "squash"),
    ("sitaw", "string beans"),
    ("pechay", "pechay"),
    ("kangkong", "water spinach"),
    ("labanos", "radish"),
    ("singkamas", "turnip"),
    ("sayote", "chayote"),
    ("pipino", "cucumber"),
    ("sili", "chili"),
    ("karot", "carrot"),
    ("luya", "ginger"),
    // Meat and eggs
    ("manok", "chicken"),
    ("baboy", "pork"),
    ("baka", "beef"),
    ("karne", "meat"),
    ("itlog", "egg"),
    // Fish and seafood
    ("isda", "fish"),
    ("bangus", "milkfish"),
    ("tilapia", "tilapia"),
    ("galunggong", "mackerel scad"),
    ("alumahan", "mackerel"),
    ("pusit", "squid"),
    ("hipon", "shrimp"),
    ("sugpo", "prawn"),
    ("tahong", "mussel"),
    ("talaba", "oyster"),
    // Grains and staples
    ("bigas", "rice"),
    ("mais", "corn"),
    ("harina", "flour"),
    ("asin", "salt"),
    ("asukal", "sugar"),
    ("mantika", "cooking oil"),
    // Fruits
    ("saging", "banana"),
    ("mangga", "mango"),
    ("papaya", "papaya"),
    ("pinya", "pineapple"),
    ("pakwan", "watermelon"),
    ("melon", "melon"),
    ("ubas", "grapes"),
    ("mansanas", "apple"),
    ("dalandan", "orange"),
    ("kalamansi", "calamansi"),
    ("abukado", "avocado"),
];

/// Non-commodity Tagalog phrases, used only by `translate` when normalizing a
/// query for the heavier fallback path.
pub const PHRASE_PAIRS: &[(&str, &str)] = &[
    ("presyo", "price"),
    ("halaga", "price"),
    ("magkano", "how much"),
    ("kilo", "kilogram"),
    ("tali", "bundle"),
    ("malaki", "large"),
    ("maliit", "small"),
    ("katamtaman", "medium"),
    ("sariwa", "fresh"),
];

/// Administrative-area alias -> canonical region. Whole-word matched,
/// case-insensitive.
pub const REGION_ALIASES: &[(&str, &str)] = &[
    // NCR cities
    ("caloocan", "NCR"),
    ("las pinas", "NCR"),
    ("makati", "NCR"),
    ("malabon", "NCR"),
    ("mandaluyong", "NCR"),
    ("manila", "NCR"),
    ("maynila", "NCR"),
    ("marikina", "NCR"),
    ("muntinlupa", "NCR"),
    ("navotas", "NCR"),
    ("paranaque", "NCR"),
    ("pasay", "NCR"),
    ("pasig", "NCR"),
    ("quezon city", "NCR"),
    ("qc", "NCR"),
    ("san juan", "NCR"),
    ("taguig", "NCR"),
    ("valenzuela", "NCR"),
    ("pateros", "NCR"),
    ("metro manila", "NCR"),
    ("ncr", "NCR"),
    ("national capital region", "NCR"),
    // Laguna cities and municipalities
    ("calamba", "Laguna"),
    ("san pablo", "Laguna"),
    ("cabuyao", "Laguna"),
    ("binan", "Laguna"),
    ("santa rosa", "Laguna"),
    ("san pedro", "Laguna"),
    ("bay", "Laguna"),
    ("cavinti", "Laguna"),
    ("pagsanjan", "Laguna"),
    ("alaminos", "Laguna"),
    ("lumban", "Laguna"),
    ("majayjay", "Laguna"),
    ("luisiana", "Laguna"),
    ("calauan", "Laguna"),
    ("famy", "Laguna"),
    ("los banos", "Laguna"),
    ("liliw", "Laguna"),
    ("mabitac", "Laguna"),
    ("siniloan", "Laguna"),
    ("santa maria", "Laguna"),
    ("paete", "Laguna"),
    ("pangil", "Laguna"),
    ("nagcarlan", "Laguna"),
    ("santa cruz", "Laguna"),
    ("pakil", "Laguna"),
    ("kalayaan", "Laguna"),
    ("pila", "Laguna"),
    ("victoria", "Laguna"),
    ("magdalena", "Laguna"),
    ("laguna", "Laguna"),
];

/// One category: Tagalog label, English query keywords that select it, and the
/// substrings an entry's `category` field must contain to belong to it.
pub struct Category {
    pub label: &'static str,
    pub display: &'static str,
    pub query_keywords: &'static [&'static str],
    pub field_markers: &'static [&'static str],
}

pub const CATEGORIES: &[Category] = &[
    Category {
        label: "gulay",
        display: "Gulay",
        query_keywords: &["vegetables", "veggie"],
        field_markers: &["vegetable"],
    },
    Category {
        label: "karne",
        display: "Karne",
        query_keywords: &["meat", "beef", "pork", "chicken"],
        field_markers: &["beef", "pork", "chicken", "meat"],
    },
    Category {
        label: "isda",
        display: "Isda",
        query_keywords: &["fish"],
        field_markers: &["fish"],
    },
    Category {
        label: "prutas",
        display: "Prutas",
        query_keywords: &["fruit", "fruits"],
        field_markers: &["fruit"],
    },
    Category {
        label: "bigas",
        display: "Bigas",
        query_keywords: &["rice"],
        field_markers: &["rice"],
    },
    Category {
        label: "pampalasa",
        display: "Pampalasa",
        query_keywords: &["spices"],
        field_markers: &["spice"],
    },
];

/// Pseudo-category matching everything when no category term is recognized.
pub const ALL_CATEGORIES_LABEL: &str = "lahat";
pub const ALL_CATEGORIES_DISPLAY: &str = "Lahat ng Produkto";

/// Words stripped from candidate tokens in the multi-product handler.
pub const STOP_WORDS: &[&str] = &[
    "magkano", "presyo", "ng", "sa", "ang", "ncr", "metro", "manila", "price",
];

/// Filler words stripped from each side of a comparison before lookup.
pub const COMPARISON_FILLERS: &[&str] = &[
    "ano", "mas", "mura", "mahal", "magkano", "presyo", "ng", "sa", "ang", "alin", "sino", "which",
    "who", "cheaper", "expensive", "more", "what", "is", "the", "price", "of", "compare",
];
