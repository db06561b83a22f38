fn main() {
    client::app::bootstrap::run_client_app();
}
