pub mod a001_category;
pub mod a002_gear;
pub mod a003_brand;
pub mod a004_reference;
pub mod a005_campsite;
pub mod projections;
