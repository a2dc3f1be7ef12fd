pub static SINE_WAVETABLE: [i8; 256] = [
    1, 4, 7, 10, 14, 17, 20, 23, 26, 29, 32, 35, 38, 41, 44, 47,
    50, 53, 56, 58, 61, 64, 67, 69, 72, 74, 77, 79, 82, 84, 87, 89,
    91, 93, 95, 97, 99, 101, 103, 105, 107, 108, 110, 112, 113, 115, 116, 117,
    118, 119, 121, 122, 122, 123, 124, 125, 125, 126, 126, 127, 127, 127, 127, 127,
    127, 127, 127, 127, 127, 126, 126, 125, 125, 124, 123, 122, 122, 121, 119, 118,
    117, 116, 115, 113, 112, 110, 108, 107, 105, 103, 101, 99, 97, 95, 93, 91,
    89, 87, 84, 82, 79, 77, 74, 72, 69, 67, 64, 61, 58, 56, 53, 50,
    47, 44, 41, 38, 35, 32, 29, 26, 23, 20, 17, 14, 10, 7, 4, 1,
    -1, -4, -7, -10, -14, -17, -20, -23, -26, -29, -32, -35, -38, -41, -44, -47,
    -50, -53, -56, -58, -61, -64, -67, -69, -72, -74, -77, -79, -82, -84, -87, -89,
    -91, -93, -95, -97, -99, -101, -103, -105, -107, -108, -110, -112, -113, -115, -116, -117,
    -118, -119, -121, -122, -122, -123, -124, -125, -125, -126, -126, -127, -127, -127, -127, -127,
    -127, -127, -127, -127, -127, -126, -126, -125, -125, -124, -123, -122, -122, -121, -119, -118,
    -117, -116, -115, -113, -112, -110, -108, -107, -105, -103, -101, -99, -97, -95, -93, -91,
    -89, -87, -84, -82, -79, -77, -74, -72, -69, -67, -64, -61, -58, -56, -53, -50,
    -47, -44, -41, -38, -35, -32, -29, -26, -23, -20, -17, -14, -10, -7, -4, -1,
];
