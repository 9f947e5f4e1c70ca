mod helpers;
mod test_compare_api;
