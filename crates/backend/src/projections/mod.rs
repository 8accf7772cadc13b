pub mod p900_category_page;
pub mod p901_admin_gear;
pub mod p902_home;
