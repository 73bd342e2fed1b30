mod measurements_test;
