pub mod search_food;
