//! Static sample pools, one per category.

use crate::category::Category;

const NAMES: &[&str] = &[
    "Jane Doe",
    "Marcus Webb",
    "Priya Natarajan",
    "Sofia Reyes",
    "Tomas Lindqvist",
    "Amara Okafor",
    "Elliot Park",
    "Nadia Haddad",
    "Ruth Calloway",
    "Dmitri Volkov",
];

const JOB_TITLES: &[&str] = &[
    "Product Designer",
    "Staff Engineer",
    "Content Strategist",
    "Research Lead",
    "Marketing Manager",
    "Data Analyst",
    "Customer Advocate",
    "Operations Director",
];

const COMPANIES: &[&str] = &[
    "Northwind Labs",
    "Bluebird Systems",
    "Fathom & Co.",
    "Larkspur Digital",
    "Quarry Works",
    "Meridian Supply",
    "Hollow Pine Studio",
    "Atlas Freight",
];

const ANIMALS: &[&str] = &[
    "Capuchin Monkey",
    "Snow Leopard",
    "Harbor Seal",
    "Red Panda",
    "Peregrine Falcon",
    "Axolotl",
    "Fennec Fox",
    "Manta Ray",
];

const COLORS: &[&str] = &[
    "Cerulean",
    "Burnt Sienna",
    "Chartreuse",
    "Periwinkle",
    "Vermilion",
    "Ochre",
    "Teal",
    "Mauve",
];

const CITIES: &[&str] = &[
    "Lisbon",
    "Nairobi",
    "Osaka",
    "Valparaiso",
    "Tallinn",
    "Montreal",
    "Da Nang",
    "Cape Town",
];

const DATES: &[&str] = &[
    "Jan 12, 2024",
    "Mar 3, 2024",
    "Apr 28, 2024",
    "Jun 15, 2024",
    "Aug 9, 2024",
    "Sep 30, 2024",
    "Nov 21, 2024",
    "Dec 24, 2024",
];

const EMAILS: &[&str] = &[
    "jane.doe@example.com",
    "m.webb@northwind.dev",
    "priya@fathom.co",
    "sofia.reyes@larkspur.io",
    "tomas@quarryworks.se",
    "amara.o@meridian.supply",
    "elliot@hollowpine.studio",
    "nadia.h@atlasfreight.com",
];

pub(crate) fn pool(category: Category) -> &'static [&'static str] {
    match category {
        Category::Name => NAMES,
        Category::JobTitle => JOB_TITLES,
        Category::Company => COMPANIES,
        Category::Animal => ANIMALS,
        Category::Color => COLORS,
        Category::City => CITIES,
        Category::Date => DATES,
        Category::Email => EMAILS,
    }
}
