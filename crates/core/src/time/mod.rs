pub mod ph_market;
