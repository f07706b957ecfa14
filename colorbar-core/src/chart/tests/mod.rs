mod bucket_tests;
