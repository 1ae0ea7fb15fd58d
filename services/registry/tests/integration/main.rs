mod helpers;

mod enrollment_test;
mod router_test;
mod scenario_test;
mod token_test;
