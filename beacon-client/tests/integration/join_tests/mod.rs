mod test_backlog_bye_skips_transport;
mod test_initiator_join_flow;
mod test_join_error_reports_once;
