mod test_concurrency;
mod test_realm_contract;
