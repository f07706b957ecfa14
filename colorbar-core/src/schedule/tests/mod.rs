mod periodic_tests;
